// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::path::Path;

use clap::{crate_version, Arg, ArgAction, ArgMatches, Command};
use procwalk::{walk_process, Pid, ProcessEntry};
use regex::Regex;
use uucore::error::{set_exit_code, UResult, USimpleError};
use uucore::{format_usage, show_error, show_warning};

const ABOUT: &str = "List running processes with the path of their executable";
const USAGE: &str = "{} [OPTION]... [PID]...";

/// Printed in place of a path that could not be resolved.
const UNRESOLVED: &str = "?";

mod options {
    pub const PID: &str = "pid";
    pub const RESOLVED_ONLY: &str = "resolved-only";
    pub const MATCH: &str = "match";
    pub const DELIMITER: &str = "delimiter";
    pub const QUIET: &str = "quiet";
    pub const WARN: &str = "warn";
}

struct Settings {
    resolved_only: bool,
    pattern: Option<Regex>,
    delimiter: String,
    quiet: bool,
    warn: bool,
}

impl Settings {
    fn from_matches(matches: &ArgMatches) -> UResult<Self> {
        let pattern = match matches.get_one::<String>(options::MATCH) {
            Some(pattern) => {
                Some(Regex::new(pattern).map_err(|e| USimpleError::new(2, e.to_string()))?)
            }
            None => None,
        };

        Ok(Self {
            resolved_only: matches.get_flag(options::RESOLVED_ONLY),
            pattern,
            delimiter: matches
                .get_one::<String>(options::DELIMITER)
                .cloned()
                .unwrap_or_else(|| " ".to_string()),
            quiet: matches.get_flag(options::QUIET),
            warn: matches.get_flag(options::WARN),
        })
    }
}

#[uucore::main]
pub fn uumain(args: impl uucore::Args) -> UResult<()> {
    let matches = uu_app().try_get_matches_from(args)?;
    let settings = Settings::from_matches(&matches)?;

    let listed = match matches.get_many::<Pid>(options::PID) {
        Some(pids) => list(pids.copied().map(ProcessEntry::from_pid), &settings, true),
        None => list(walk_process(), &settings, false),
    };

    if listed == 0 {
        set_exit_code(1);
    }

    Ok(())
}

/// Print one line per process that passes the filters, returning how many passed.
///
/// Processes asked for by pid must resolve; walked processes may show up unresolved.
fn list(
    processes: impl Iterator<Item = ProcessEntry>,
    settings: &Settings,
    requested: bool,
) -> usize {
    let mut listed = 0;

    for process in processes {
        let exe = match process.exe() {
            Ok(exe) => Some(exe),
            Err(e) if requested => {
                show_error!("{e}");
                set_exit_code(1);
                continue;
            }
            Err(e) => {
                if settings.warn {
                    show_warning!("{e}");
                }
                None
            }
        };

        if let Some(line) = format_line(&process, exe.as_deref(), settings) {
            listed += 1;
            if !settings.quiet {
                println!("{line}");
            }
        }
    }

    listed
}

fn format_line(process: &ProcessEntry, exe: Option<&Path>, settings: &Settings) -> Option<String> {
    let exe = match exe {
        Some(exe) => exe.to_string_lossy(),
        // an unknown path can't match anything
        None if settings.resolved_only || settings.pattern.is_some() => return None,
        None => UNRESOLVED.into(),
    };

    if let Some(pattern) = &settings.pattern {
        if !pattern.is_match(&exe) {
            return None;
        }
    }

    Some(format!("{process}{}{exe}", settings.delimiter))
}

pub fn uu_app() -> Command {
    Command::new(uucore::util_name())
        .version(crate_version!())
        .about(ABOUT)
        .override_usage(format_usage(USAGE))
        .infer_long_args(true)
        .arg(
            Arg::new(options::RESOLVED_ONLY)
                .short('r')
                .long(options::RESOLVED_ONLY)
                .help("Only list processes whose executable could be resolved")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(options::MATCH)
                .short('m')
                .long(options::MATCH)
                .value_name("REGEX")
                .help("Only list processes whose executable path matches REGEX"),
        )
        .arg(
            Arg::new(options::DELIMITER)
                .short('d')
                .long(options::DELIMITER)
                .value_name("SEP")
                .help("Separator between pid and path (default: space)"),
        )
        .arg(
            Arg::new(options::QUIET)
                .short('q')
                .long(options::QUIET)
                .help("Print nothing, only set the exit status")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(options::WARN)
                .short('w')
                .long(options::WARN)
                .help("Report executables that cannot be resolved")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(options::PID)
                .value_name("PID")
                .help("Only look at these processes")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(Pid)),
        )
}

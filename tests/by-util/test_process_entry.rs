// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use procwalk::{Pid, ProcessEntry};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Pid of a child that has already been reaped.
fn reaped_pid() -> Pid {
    let mut child = Command::new(std::env::current_exe().unwrap())
        .arg("--list")
        .stdout(Stdio::null())
        .spawn()
        .unwrap();
    let pid = child.id();
    child.wait().unwrap();
    pid as Pid
}

/// Both forms must agree on success and on failure.
fn assert_exe_forms_agree(entry: &ProcessEntry) {
    let mut error = None;
    let quiet = entry.exe_or_empty(&mut error);
    match (entry.exe(), error) {
        (Ok(path), None) => assert_eq!(path, quiet),
        (Err(_), Some(_)) => assert_eq!(quiet, PathBuf::new()),
        (loud, quiet_error) => {
            panic!("exe() = {loud:?} but exe_or_empty() reported {quiet_error:?}")
        }
    }
}

#[test]
fn test_display_writes_pid() {
    assert_eq!(ProcessEntry::from_pid(1).to_string(), "1");
    assert_eq!(format!("[{}]", ProcessEntry::from_pid(31337)), "[31337]");
}

#[test]
fn test_exe_of_exited_process_fails() {
    let entry = ProcessEntry::from_pid(reaped_pid());
    let mut error = None;
    assert_eq!(entry.exe_or_empty(&mut error), PathBuf::new());
    assert!(error.is_some());
    assert!(entry.exe().is_err());
}

#[test]
#[cfg(any(target_os = "linux", windows))]
fn test_exe_of_exited_process_is_not_found() {
    use procwalk::ProcessError;

    let err = ProcessEntry::from_pid(reaped_pid()).exe().unwrap_err();
    assert!(matches!(err, ProcessError::NotFound { .. }), "{err:?}");
    assert!(err.raw_os_error().is_some());
}

#[test]
#[cfg(any(target_os = "linux", windows))]
fn test_exe_of_current_process() {
    let entry = ProcessEntry::from_pid(std::process::id() as Pid);
    assert_eq!(entry.exe().unwrap(), std::env::current_exe().unwrap());
    assert_exe_forms_agree(&entry);
}

#[test]
#[cfg(unix)]
fn test_exe_forms_agree_on_simulated_root() {
    use procwalk::ProcessIterator;
    use std::os::unix::fs::symlink;

    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("10")).unwrap();
    std::fs::create_dir(root.path().join("20")).unwrap();
    symlink("/opt/app/bin/server", root.path().join("20").join("exe")).unwrap();

    let mut resolved = vec![];
    for entry in ProcessIterator::begin_at(root.path()) {
        assert_exe_forms_agree(&entry);
        if let Ok(path) = entry.exe() {
            resolved.push((entry.pid(), path));
        }
    }
    assert_eq!(resolved, vec![(20, PathBuf::from("/opt/app/bin/server"))]);
}

#[test]
#[cfg(target_os = "linux")]
fn test_entries_hold_no_cache() {
    use procwalk::ProcessIterator;

    let me = std::process::id() as Pid;
    let entry = ProcessIterator::begin()
        .find(|it| it.pid() == me)
        .unwrap();
    assert_eq!(entry.exe().unwrap(), entry.exe().unwrap());
}

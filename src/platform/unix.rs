// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::ProcessError;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use walkdir::{DirEntry, WalkDir};

/// Process identifier as the kernel hands it out.
pub type Pid = libc::pid_t;

/// Where the process-information pseudo-filesystem is mounted.
pub const PROC_ROOT: &str = "/proc";

/// One process below the process-information root (Unix)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pid: Pid,
    /// `<root>/<pid>`
    path: PathBuf,
}

impl ProcessEntry {
    /// Entry for an arbitrary pid below [`PROC_ROOT`], whether or not it is running.
    pub fn from_pid(pid: Pid) -> Self {
        Self {
            pid,
            path: Path::new(PROC_ROOT).join(pid.to_string()),
        }
    }

    /// Keep only directories named by a pid, i.e. purely ASCII digits that fit in [`Pid`].
    ///
    /// Everything else living next to them (`self`, `sys`, `meminfo`, ...) is not a process.
    fn from_dir_entry(entry: &DirEntry) -> Option<Self> {
        if !entry.file_type().is_dir() {
            return None;
        }

        let name = entry.file_name().to_str()?;
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(Self {
            pid: name.parse::<Pid>().ok()?,
            path: entry.path().to_path_buf(),
        })
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Resolve the `exe` link of this process.
    ///
    /// Fails when the process is gone, when the caller may not look at it, or when
    /// the kernel exposes no target (kernel threads).
    pub fn exe(&self) -> Result<PathBuf, ProcessError> {
        fs::read_link(self.path.join("exe")).map_err(|err| ProcessError::from_io(self.pid, err))
    }
}

/// Directory traversal over the process-information root.
///
/// Clones share the traversal position; the directory handle goes away with the last clone.
#[derive(Clone)]
pub(crate) struct Walker {
    dir: Rc<RefCell<walkdir::IntoIter>>,
}

impl Walker {
    pub(crate) fn open() -> Result<(Self, Option<ProcessEntry>), ProcessError> {
        Self::open_at(Path::new(PROC_ROOT))
    }

    /// Start walking `root` and fetch the first process below it.
    ///
    /// Only a failure to read `root` itself is reported; unreadable children are skipped.
    pub(crate) fn open_at(root: &Path) -> Result<(Self, Option<ProcessEntry>), ProcessError> {
        let mut dir = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter();

        // walkdir opens the root lazily, so its errors show up on the first step
        let first = loop {
            match dir.next() {
                None => break None,
                Some(Ok(entry)) => {
                    if let Some(process) = ProcessEntry::from_dir_entry(&entry) {
                        break Some(process);
                    }
                }
                Some(Err(err)) if err.depth() == 0 => {
                    return Err(ProcessError::Enumeration { source: err.into() });
                }
                Some(Err(_)) => {}
            }
        };

        let walker = Self {
            dir: Rc::new(RefCell::new(dir)),
        };
        Ok((walker, first))
    }

    /// Next process in directory order, skipping entries that vanished or cannot be read.
    pub(crate) fn next_entry(&self) -> Option<ProcessEntry> {
        self.dir
            .borrow_mut()
            .by_ref()
            .flatten()
            .find_map(|entry| ProcessEntry::from_dir_entry(&entry))
    }
}

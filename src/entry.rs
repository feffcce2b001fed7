// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::ProcessError;
use crate::platform::ProcessEntry;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

impl ProcessEntry {
    /// Like [`ProcessEntry::exe`], but report the failure through `error`.
    ///
    /// Returns an empty path and sets `error` on failure, clears `error` on success.
    pub fn exe_or_empty(&self, error: &mut Option<ProcessError>) -> PathBuf {
        match self.exe() {
            Ok(path) => {
                *error = None;
                path
            }
            Err(err) => {
                *error = Some(err);
                PathBuf::new()
            }
        }
    }
}

/// Writes the pid.
impl Display for ProcessEntry {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.pid())
    }
}

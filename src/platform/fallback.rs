// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::ProcessError;
use std::path::PathBuf;

pub type Pid = u32;

/// Process entry on platforms without a process list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pid: Pid,
}

impl ProcessEntry {
    pub fn from_pid(pid: Pid) -> Self {
        Self { pid }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn exe(&self) -> Result<PathBuf, ProcessError> {
        Err(ProcessError::Unsupported { pid: self.pid })
    }
}

/// Walker that has nothing to walk.
#[derive(Clone)]
pub(crate) struct Walker;

impl Walker {
    pub(crate) fn open() -> Result<(Self, Option<ProcessEntry>), ProcessError> {
        Ok((Self, None))
    }

    pub(crate) fn next_entry(&self) -> Option<ProcessEntry> {
        None
    }
}

// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::io;

use thiserror::Error;

use crate::platform::Pid;

/// Errors that can occur while walking processes or resolving their executables
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process list could not be opened at all
    #[error("cannot enumerate processes: {source}")]
    Enumeration {
        #[source]
        source: io::Error,
    },
    /// Process with given PID does not exist (anymore)
    #[error("process {pid} not found")]
    NotFound {
        pid: Pid,
        #[source]
        source: io::Error,
    },
    /// Permission denied when accessing process information
    #[error("permission denied for process {pid}")]
    PermissionDenied {
        pid: Pid,
        #[source]
        source: io::Error,
    },
    /// Requested feature is not supported on this platform
    #[error("cannot resolve executable of process {pid}: not supported on this platform")]
    Unsupported { pid: Pid },
    /// Any other I/O error
    #[error("cannot resolve executable of process {pid}: {source}")]
    Io {
        pid: Pid,
        #[source]
        source: io::Error,
    },
}

impl ProcessError {
    /// Classify an I/O error raised while inspecting `pid`.
    pub(crate) fn from_io(pid: Pid, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { pid, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { pid, source },
            io::ErrorKind::Unsupported => Self::Unsupported { pid },
            _ => Self::Io { pid, source },
        }
    }

    /// The process this error is about, if any.
    pub fn pid(&self) -> Option<Pid> {
        match self {
            Self::Enumeration { .. } => None,
            Self::NotFound { pid, .. }
            | Self::PermissionDenied { pid, .. }
            | Self::Unsupported { pid }
            | Self::Io { pid, .. } => Some(*pid),
        }
    }

    /// The underlying platform error code (`errno` or `GetLastError()`).
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Enumeration { source }
            | Self::NotFound { source, .. }
            | Self::PermissionDenied { source, .. }
            | Self::Io { source, .. } => source.raw_os_error(),
            Self::Unsupported { .. } => None,
        }
    }
}

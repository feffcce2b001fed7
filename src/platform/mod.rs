// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Platform realizations of the process walker.
//!
//! Exactly one of the modules below is compiled in. Each exports the same
//! names: [`Pid`], [`ProcessEntry`] and the crate-private `Walker` that
//! [`crate::ProcessIterator`] drives.

#[cfg(not(any(unix, windows)))]
mod fallback;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(not(any(unix, windows)))]
pub(crate) use fallback::Walker;
#[cfg(not(any(unix, windows)))]
pub use fallback::{Pid, ProcessEntry};
#[cfg(unix)]
pub(crate) use unix::Walker;
#[cfg(unix)]
pub use unix::{Pid, ProcessEntry, PROC_ROOT};
#[cfg(windows)]
pub(crate) use windows::Walker;
#[cfg(windows)]
pub use windows::{Pid, ProcessEntry};

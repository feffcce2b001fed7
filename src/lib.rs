// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! Lazy cross-platform iteration over running processes
//!
//! This crate walks the processes currently visible to the operating system
//! one at a time, exposing the pid of each and resolving the path of its
//! executable on demand. Unix-like systems are walked through `/proc`,
//! Windows through a Toolhelp process snapshot.
//!
//! # Example
//!
//! ```no_run
//! use procwalk::walk_process;
//!
//! for process in walk_process() {
//!     match process.exe() {
//!         Ok(exe) => println!("{process} {}", exe.display()),
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! ```

mod entry;
pub mod error;
mod iterator;
pub mod platform;

// Re-export commonly used types and functions
pub use error::ProcessError;
pub use iterator::{walk_process, ProcessIterator};
#[cfg(unix)]
pub use platform::PROC_ROOT;
pub use platform::{Pid, ProcessEntry};

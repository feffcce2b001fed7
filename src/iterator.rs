// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::ProcessError;
use crate::platform::{ProcessEntry, Walker};
use std::fmt;
use std::iter::FusedIterator;
#[cfg(unix)]
use std::path::Path;

/// Forward-only cursor over the processes currently visible to the system.
///
/// A cursor either points at a process or is at the end. Two cursors compare
/// equal when both are at the end or both point at the same pid, which is what
/// ends a [`begin`](Self::begin)/[`end`](Self::end) loop:
///
/// ```
/// use procwalk::ProcessIterator;
///
/// let mut it = ProcessIterator::begin();
/// while it != ProcessIterator::end() {
///     println!("{}", it.current().pid());
///     it.advance();
/// }
/// ```
///
/// The cursor is also an [`Iterator`] yielding each [`ProcessEntry`] once.
///
/// Cloning a cursor is cheap and shares the underlying directory walk or
/// snapshot, including its read position, so clones behave like one input
/// iterator. Cursors are `!Send`; open one per thread instead.
#[derive(Clone, Default)]
pub struct ProcessIterator {
    entry: Option<ProcessEntry>,
    walker: Option<Walker>,
}

impl ProcessIterator {
    /// Cursor at the first running process.
    ///
    /// If the process list cannot be opened this is the end cursor, exactly as
    /// if no process existed. Use [`try_begin`](Self::try_begin) to tell the two apart.
    pub fn begin() -> Self {
        Self::try_begin().unwrap_or_default()
    }

    /// Cursor at the first running process, or the reason the process list could not be opened.
    pub fn try_begin() -> Result<Self, ProcessError> {
        Walker::open().map(Self::from_parts)
    }

    /// [`begin`](Self::begin) against another process-information root than `/proc`.
    #[cfg(unix)]
    pub fn begin_at(root: impl AsRef<Path>) -> Self {
        Self::try_begin_at(root).unwrap_or_default()
    }

    /// [`try_begin`](Self::try_begin) against another process-information root than `/proc`.
    #[cfg(unix)]
    pub fn try_begin_at(root: impl AsRef<Path>) -> Result<Self, ProcessError> {
        Walker::open_at(root.as_ref()).map(Self::from_parts)
    }

    /// The end cursor. Never touches the system.
    pub fn end() -> Self {
        Self::default()
    }

    fn from_parts((walker, entry): (Walker, Option<ProcessEntry>)) -> Self {
        match entry {
            Some(entry) => Self {
                entry: Some(entry),
                walker: Some(walker),
            },
            None => Self::end(),
        }
    }

    /// Whether the cursor is past the last process.
    pub fn is_end(&self) -> bool {
        self.entry.is_none()
    }

    /// The process under the cursor, `None` at the end.
    pub fn get(&self) -> Option<&ProcessEntry> {
        self.entry.as_ref()
    }

    /// The process under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    pub fn current(&self) -> &ProcessEntry {
        match &self.entry {
            Some(entry) => entry,
            None => panic!("ProcessIterator::current called on the end cursor"),
        }
    }

    /// Move to the next process, or to the end.
    ///
    /// Advancing the end cursor leaves it at the end. The walk is released as
    /// soon as it is exhausted.
    pub fn advance(&mut self) -> &mut Self {
        self.entry = self.walker.as_ref().and_then(Walker::next_entry);
        if self.entry.is_none() {
            self.walker = None;
        }
        self
    }
}

impl PartialEq for ProcessIterator {
    fn eq(&self, other: &Self) -> bool {
        match (&self.entry, &other.entry) {
            (Some(a), Some(b)) => a.pid() == b.pid(),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for ProcessIterator {}

impl fmt::Debug for ProcessIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessIterator")
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}

impl Iterator for ProcessIterator {
    type Item = ProcessEntry;

    /// Hand out the current process and step past it.
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entry.take()?;
        self.advance();
        Some(entry)
    }
}

impl FusedIterator for ProcessIterator {}

/// Iterating processes in current system
pub fn walk_process() -> impl Iterator<Item = ProcessEntry> {
    ProcessIterator::begin()
}

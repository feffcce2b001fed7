// This file is part of the uutils procps package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use crate::error::ProcessError;
use std::cell::RefCell;
use std::ffi::{c_void, OsString};
use std::io;
use std::mem;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;
use std::ptr::{self, NonNull};
use std::rc::Rc;

use windows_sys::Win32::Foundation::{
    CloseHandle, ERROR_INVALID_PARAMETER, ERROR_NO_MORE_FILES, HANDLE, INVALID_HANDLE_VALUE,
    MAX_PATH,
};
use windows_sys::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use windows_sys::Win32::System::ProcessStatus::GetModuleFileNameExW;
use windows_sys::Win32::System::Threading::{
    OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
};

/// Process identifier (`DWORD`).
pub type Pid = u32;

struct HandleWrapper(NonNull<c_void>);

impl HandleWrapper {
    /// Take ownership of `handle`, or capture `GetLastError()` if the call that produced it failed.
    fn new(handle: HANDLE) -> io::Result<Self> {
        if handle == INVALID_HANDLE_VALUE {
            return Err(io::Error::last_os_error());
        }
        NonNull::new(handle)
            .map(Self)
            .ok_or_else(io::Error::last_os_error)
    }

    fn as_raw(&self) -> HANDLE {
        self.0.as_ptr()
    }
}

impl Drop for HandleWrapper {
    fn drop(&mut self) {
        unsafe {
            CloseHandle(self.0.as_ptr());
        };
    }
}

/// One process of a Toolhelp snapshot (Windows)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pid: Pid,
}

impl ProcessEntry {
    /// Entry for an arbitrary pid, whether or not it is running.
    pub fn from_pid(pid: Pid) -> Self {
        Self { pid }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// Query the file name of the main module of this process.
    ///
    /// Paths longer than `MAX_PATH` come back truncated.
    pub fn exe(&self) -> Result<PathBuf, ProcessError> {
        let handle = HandleWrapper::new(unsafe {
            OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, 0, self.pid)
        })
        .map_err(|err| self.open_error(err))?;

        let mut filename = [0u16; MAX_PATH as usize];
        let size = unsafe {
            GetModuleFileNameExW(
                handle.as_raw(),
                ptr::null_mut(),
                filename.as_mut_ptr(),
                filename.len() as u32,
            )
        };
        if size == 0 {
            return Err(ProcessError::from_io(self.pid, io::Error::last_os_error()));
        }

        Ok(PathBuf::from(OsString::from_wide(&filename[..size as usize])))
    }

    /// `OpenProcess` answers `ERROR_INVALID_PARAMETER` for pids that do not exist.
    fn open_error(&self, err: io::Error) -> ProcessError {
        if err.raw_os_error() == Some(ERROR_INVALID_PARAMETER as i32) {
            ProcessError::NotFound {
                pid: self.pid,
                source: err,
            }
        } else {
            ProcessError::from_io(self.pid, err)
        }
    }
}

/// Snapshot handle together with the record the last walk call filled in.
struct Snapshot {
    handle: HandleWrapper,
    record: PROCESSENTRY32W,
}

/// Snapshot-and-advance walk over a Toolhelp process snapshot.
///
/// Clones share the snapshot and its read position; the handle is closed with the last clone.
#[derive(Clone)]
pub(crate) struct Walker {
    snapshot: Rc<RefCell<Snapshot>>,
}

impl Walker {
    pub(crate) fn open() -> Result<(Self, Option<ProcessEntry>), ProcessError> {
        let handle =
            HandleWrapper::new(unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) })
                .map_err(|source| ProcessError::Enumeration { source })?;

        let mut record: PROCESSENTRY32W = unsafe { mem::zeroed() };
        record.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

        let first = if unsafe { Process32FirstW(handle.as_raw(), &mut record) } != 0 {
            Some(ProcessEntry::from_pid(record.th32ProcessID))
        } else {
            let err = io::Error::last_os_error();
            if err.raw_os_error() != Some(ERROR_NO_MORE_FILES as i32) {
                return Err(ProcessError::Enumeration { source: err });
            }
            None
        };

        let walker = Self {
            snapshot: Rc::new(RefCell::new(Snapshot { handle, record })),
        };
        Ok((walker, first))
    }

    pub(crate) fn next_entry(&self) -> Option<ProcessEntry> {
        let mut snapshot = self.snapshot.borrow_mut();
        let Snapshot { handle, record } = &mut *snapshot;
        if unsafe { Process32NextW(handle.as_raw(), record) } == 0 {
            return None;
        }
        Some(ProcessEntry::from_pid(record.th32ProcessID))
    }
}

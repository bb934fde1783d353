//! Best-effort memory locking (Windows)
//!
//! `VirtualLock` is the Windows analog of POSIX `mlock`. A denial because
//! the process's minimum working set is exhausted is tolerated, matching
//! the POSIX `EPERM`/`ENOMEM` tolerance policy.

use crate::error::DrngError;
use windows_sys::Win32::Foundation::GetLastError;
use windows_sys::Win32::System::Memory::{VirtualLock, VirtualUnlock};

const ERROR_WORKING_SET_QUOTA: u32 = 1453;

pub(crate) fn lock_memory<T>(value: &T) -> Result<(), DrngError> {
    let ptr = value as *const T as *mut core::ffi::c_void;
    let len = std::mem::size_of::<T>();

    let ok = unsafe { VirtualLock(ptr, len) };
    if ok != 0 {
        return Ok(());
    }

    match unsafe { GetLastError() } {
        ERROR_WORKING_SET_QUOTA => Ok(()),
        _ => Err(DrngError::MemoryLock),
    }
}

pub(crate) fn unlock_memory<T>(value: &T) {
    let ptr = value as *const T as *mut core::ffi::c_void;
    let len = std::mem::size_of::<T>();

    unsafe {
        VirtualUnlock(ptr, len);
    }
}

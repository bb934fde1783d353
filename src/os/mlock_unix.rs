//! Best-effort memory locking (POSIX)
//!
//! Locks the handle's backing memory into RAM so the key material is
//! never written out to swap. Denials due to privilege or resource
//! limits are tolerated; any other failure is fatal (spec-mandated
//! policy, see [`crate::error::DrngError::MemoryLock`]).

use crate::error::DrngError;
use std::io;

pub(crate) fn lock_memory<T>(value: &T) -> Result<(), DrngError> {
    let ptr = value as *const T as *const libc::c_void;
    let len = std::mem::size_of::<T>();

    let ret = unsafe { libc::mlock(ptr, len) };
    if ret == 0 {
        return Ok(());
    }

    match io::Error::last_os_error().raw_os_error() {
        Some(libc::EPERM) | Some(libc::ENOMEM) => Ok(()),
        _ => Err(DrngError::MemoryLock),
    }
}

pub(crate) fn unlock_memory<T>(value: &T) {
    let ptr = value as *const T as *const libc::c_void;
    let len = std::mem::size_of::<T>();

    unsafe {
        libc::munlock(ptr, len);
    }
}

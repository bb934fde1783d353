//! Operating system abstraction layer (Linux)
//!
//! Exposes a single-attempt wrapper around the `getrandom` system call.
//! Retrying on partial reads and `EINTR` is the entropy-source adapter's
//! job (see [`crate::entropy::syscall`]), not this layer's — this module
//! only reports what the kernel actually did on one call.

use libc::{c_void, getrandom};
use std::io;

/// Issues one `getrandom(2)` call, returning the number of bytes written
/// into `buf` or the OS error that aborted it.
pub(crate) fn sys_random_once(buf: &mut [u8]) -> io::Result<usize> {
    let ret = unsafe { getrandom(buf.as_mut_ptr() as *mut c_void, buf.len(), 0) };

    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret as usize)
    }
}

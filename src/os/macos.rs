//! Operating system abstraction layer (macOS)
//!
//! `arc4random_buf` has no failure mode and always fills the entire
//! buffer in one call, so there is nothing for the entropy-source adapter
//! above this layer to retry.

use libc::arc4random_buf;
use std::io;

/// Fills `buf` completely with OS-provided random bytes.
pub(crate) fn sys_random_once(buf: &mut [u8]) -> io::Result<usize> {
    unsafe {
        arc4random_buf(buf.as_mut_ptr() as *mut libc::c_void, buf.len());
    }
    Ok(buf.len())
}

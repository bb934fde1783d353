//! Operating system abstraction layer (Windows)
//!
//! `BCryptGenRandom` fills its entire output buffer or fails outright, so
//! there is no partial-read case for the entropy-source adapter above this
//! layer to retry.

use std::io;
use windows_sys::Win32::Security::Cryptography::{
    BCRYPT_USE_SYSTEM_PREFERRED_RNG, BCryptGenRandom,
};

/// Fills `buf` completely with OS-provided random bytes, or reports the
/// NTSTATUS code that prevented it.
pub(crate) fn sys_random_once(buf: &mut [u8]) -> io::Result<usize> {
    let status = unsafe {
        BCryptGenRandom(
            std::ptr::null_mut(),
            buf.as_mut_ptr(),
            buf.len() as u32,
            BCRYPT_USE_SYSTEM_PREFERRED_RNG,
        )
    };

    if status != 0 {
        Err(io::Error::from_raw_os_error(status))
    } else {
        Ok(buf.len())
    }
}

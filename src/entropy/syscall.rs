//! Platform random-bytes syscall source.
//!
//! Wraps the OS's direct kernel-entropy syscall (`getrandom` on Linux,
//! `arc4random_buf` on macOS, `BCryptGenRandom` on Windows — see
//! [`crate::os`]), retrying on interruption and accumulating partial
//! returns until the request is satisfied or a fatal error occurs.

use super::EntropySource;
use crate::error::SourceError;
use crate::os::sys_random_once;
use std::io;

pub(crate) struct SyscallSource;

impl SyscallSource {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl EntropySource for SyscallSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let mut filled = 0;

        while filled < buf.len() {
            match sys_random_once(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(SourceError::Io(e.kind())),
            }
        }

        Ok(filled)
    }
}

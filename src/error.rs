//! Error types surfaced by the crate.
//!
//! Mirrors the taxonomy a C implementation would return as negative
//! integers: configuration, initialization, entropy-shortfall, and
//! source-transport failures each get their own variant rather than a
//! single opaque code.

use std::fmt;

/// Failure modes for [`crate::ChaCha20Drng`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrngError {
    /// The handle could not be allocated.
    Alloc,
    /// Locking the handle's memory failed for a reason other than a
    /// tolerated privilege/resource denial.
    MemoryLock,
    /// A self-test (the ChaCha20 block vector or a DRBG-level scenario)
    /// produced output that did not match the expected vector.
    SelfTest,
    /// Fewer than 32 bytes of entropy were collected from all enabled
    /// sources combined during a reseed.
    EntropyShortfall,
    /// An enabled entropy source reported a transport failure.
    Source(SourceError),
    /// A requested length does not fit in a `u32`, the bound ChaCha20's
    /// 32-bit block counter places on a single `generate` call.
    LengthOverflow,
}

/// Failure modes reported by an individual entropy source adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// The source was interrupted and exhausted its retry budget.
    Interrupted,
    /// The underlying OS call failed; the wrapped kind is the last
    /// `std::io::Error`'s kind observed.
    Io(std::io::ErrorKind),
    /// The source failed its own startup self-test and is permanently
    /// unavailable for the remainder of the process.
    Unavailable,
}

impl fmt::Display for DrngError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrngError::Alloc => write!(f, "failed to allocate DRBG handle"),
            DrngError::MemoryLock => write!(f, "failed to lock DRBG handle memory"),
            DrngError::SelfTest => write!(f, "self-test failed, implementation is corrupted"),
            DrngError::EntropyShortfall => {
                write!(f, "entropy sources did not provide the required 32 bytes")
            }
            DrngError::Source(e) => write!(f, "entropy source failure: {e}"),
            DrngError::LengthOverflow => write!(f, "requested length exceeds u32::MAX"),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Interrupted => write!(f, "interrupted past retry budget"),
            SourceError::Io(kind) => write!(f, "I/O error: {kind:?}"),
            SourceError::Unavailable => write!(f, "source unavailable"),
        }
    }
}

impl std::error::Error for DrngError {}
impl std::error::Error for SourceError {}

impl From<SourceError> for DrngError {
    fn from(e: SourceError) -> Self {
        DrngError::Source(e)
    }
}

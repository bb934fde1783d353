//! A ChaCha20-based deterministic random bit generator
//!
//! [`ChaCha20Drng`] produces cryptographically strong random bytes from a
//! ChaCha20 keystream, automatically reseeding itself from OS-provided
//! entropy on a time and volume schedule so long-running processes never
//! have to manage reseeding by hand.
//!
//! # Design goals
//!
//! - Forward secrecy: every `get` call re-keys the generator from its own
//!   keystream output before returning, so compromising the state after
//!   the fact does not reveal past output.
//! - No silent entropy starvation: a reseed that cannot gather enough OS
//!   entropy fails loudly with [`DrngError::EntropyShortfall`] rather
//!   than continuing on a weak seed.
//! - Secure erasure: key material is zeroized on every re-key and on
//!   drop, via the `zeroize` crate.
//!
//! # Non-goals
//!
//! This is not a cryptographically agile framework (ChaCha20 only), not
//! thread-safe, not fork-safe across `fork(2)`, and not a formal
//! SP800-90A prediction-resistant DRBG. One handle belongs to one thread
//! of one process for its entire lifetime.
//!
//! # Module overview
//!
//! - `chacha20` — the dependency-free ChaCha20 block function (RFC
//!   7539/8439 §2.3).
//! - `drbg` — the DRBG state object: `update`, `seed`, `generate`.
//! - `entropy` — OS entropy-source adapters (syscall, CPU jitter,
//!   entropy device), selected at compile time by Cargo feature.
//! - `reseed` — the fixed-order reseed orchestrator built on `entropy`.
//! - `handle` — the public [`ChaCha20Drng`] handle tying the above
//!   together with the auto-reseed policy.
//! - `os` — the per-platform syscall and memory-locking primitives.
//! - `error` — the crate's error types.
//! - `selftest` — the power-on known-answer self-test.

mod chacha20;
mod drbg;
mod entropy;
mod error;
mod handle;
mod os;
mod reseed;
mod selftest;

pub use error::{DrngError, SourceError};
pub use handle::{version, version_string, ChaCha20Drng};

//! Entropy-source adapters.
//!
//! A fixed set of up to three source adapters, each reporting bytes
//! returned or a transport failure. The reseed orchestrator in
//! [`crate::reseed`] consumes them in a fixed order; which adapters
//! exist at all is decided at compile time by the `source-syscall`,
//! `source-jitter`, and `source-device` Cargo features.

use crate::error::SourceError;

#[cfg(feature = "source-syscall")]
pub(crate) mod syscall;

#[cfg(feature = "source-jitter")]
pub(crate) mod jitter;

#[cfg(feature = "source-device")]
pub(crate) mod device;

#[cfg(not(any(
    feature = "source-syscall",
    feature = "source-jitter",
    feature = "source-device"
)))]
compile_error!(
    "chacha20-drng requires at least one of the `source-syscall`, `source-jitter`, or \
     `source-device` features to be enabled"
);

/// A raw operating-system (or hardware-proxy) entropy source.
///
/// `read` fills up to `buf.len()` bytes and reports how many it actually
/// wrote. A source is free to return fewer bytes than requested if the
/// underlying mechanism persistently does so (spec.md §4.5) — the
/// orchestrator treats any positive count as usable entropy, it does not
/// require the request to be fully satisfied.
pub(crate) trait EntropySource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;
}

/// The fixed-order list of entropy sources this build was compiled with.
///
/// Construction never fails: individual sources that are lazily
/// initialized (the jitter collector) defer their own self-test to first
/// `read`, at which point a failure simply makes that one source report
/// [`SourceError::Unavailable`] without affecting the others.
pub(crate) struct Sources {
    #[cfg(feature = "source-syscall")]
    syscall: syscall::SyscallSource,
    #[cfg(feature = "source-jitter")]
    jitter: jitter::JitterSource,
    #[cfg(feature = "source-device")]
    device: device::DeviceSource,
}

impl Sources {
    pub(crate) fn new() -> Self {
        Self {
            #[cfg(feature = "source-syscall")]
            syscall: syscall::SyscallSource::new(),
            #[cfg(feature = "source-jitter")]
            jitter: jitter::JitterSource::new(),
            #[cfg(feature = "source-device")]
            device: device::DeviceSource::new(),
        }
    }

    /// Visits each compiled-in source in the fixed policy order:
    /// platform syscall, jitter collector, entropy device — calling `f`
    /// with a mutable reference to each. `f` returns `true` to keep
    /// going, `false` to stop early (used by the orchestrator to abort
    /// on a hard source error).
    pub(crate) fn for_each(&mut self, mut f: impl FnMut(&str, &mut dyn EntropySource) -> bool) {
        #[cfg(feature = "source-syscall")]
        if !f("syscall", &mut self.syscall) {
            return;
        }
        #[cfg(feature = "source-jitter")]
        if !f("jitter", &mut self.jitter) {
            return;
        }
        #[cfg(feature = "source-device")]
        if !f("device", &mut self.device) {
            return;
        }
    }

    /// Releases any OS resources held by the sources (the jitter
    /// collector singleton, the device file descriptor), mirroring the
    /// C original's `drng_seedsource_dealloc` teardown on destroy.
    pub(crate) fn release(&mut self) {
        #[cfg(feature = "source-jitter")]
        self.jitter.release();
        #[cfg(feature = "source-device")]
        self.device.release();
    }
}

//! The public DRBG handle: lifecycle, auto-reseed policy, and the two
//! operations callers actually see — `get` and `reseed`.

use crate::drbg::ChaCha20State;
use crate::entropy::Sources;
use crate::error::DrngError;
use crate::os;
use crate::reseed;
use crate::selftest;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Auto-reseed triggers, spec.md §4.7: whichever fires first wins.
const RESEED_INTERVAL_SECS: u64 = 600;
const RESEED_VOLUME_BYTES: u64 = 1 << 30;

/// Pure decision function for the auto-reseed policy, extracted so it is
/// testable without manipulating real clock state.
fn reseed_is_due(elapsed_since_last_seed: Duration, generated_bytes: u64) -> bool {
    elapsed_since_last_seed.as_secs() > RESEED_INTERVAL_SECS
        || generated_bytes > RESEED_VOLUME_BYTES
}

const VERSION_MAJOR: u32 = 1;
const VERSION_MINOR: u32 = 3;
const VERSION_PATCH: u32 = 1;

fn nanos_now() -> [u8; 8] {
    let ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    ns.to_le_bytes()
}

/// A mixed-in value distinct per word index even when two calls land in
/// the same timer tick.
fn timestamp_word(index: u32) -> [u8; 4] {
    let ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (ns ^ index.wrapping_mul(0x9E37_79B1)).to_le_bytes()
}

/// A ChaCha20-based deterministic random bit generator that reseeds
/// itself from OS entropy on a time/volume schedule.
///
/// Not thread-safe, not fork-safe, and not a formal SP800-90A
/// prediction-resistant DRBG (spec.md §1) — one handle belongs to one
/// thread of one process for its whole lifetime.
pub struct ChaCha20Drng {
    state: Box<ChaCha20State>,
    sources: Sources,
    generated_bytes: u64,
    last_seeded: Instant,
}

impl ChaCha20Drng {
    /// Runs the power-on self-test, allocates and mlocks the state,
    /// perturbs the fresh key and nonce with high-resolution timestamps
    /// (spec.md's pre-reseed mixing step, ahead of the first source
    /// reseed), then performs the initial reseed from OS entropy.
    pub fn init() -> Result<Self, DrngError> {
        selftest::run()?;

        let mut state = Box::new(ChaCha20State::new());
        os::lock_memory(&*state)?;

        for i in 0..8u32 {
            let word = timestamp_word(i);
            let dst = state.key_word_mut(i as usize);
            for (d, s) in dst.iter_mut().zip(word.iter()) {
                *d ^= s;
            }
        }
        for i in 0..3u32 {
            let word = timestamp_word(8 + i);
            let dst = state.nonce_word_mut(i as usize);
            for (d, s) in dst.iter_mut().zip(word.iter()) {
                *d ^= s;
            }
        }

        let mut sources = Sources::new();
        reseed::reseed(&mut state, &mut sources, None)?;

        Ok(Self {
            state,
            sources,
            generated_bytes: 0,
            last_seeded: Instant::now(),
        })
    }

    /// Fills `out` with DRBG output, auto-reseeding first if either the
    /// 600-second time trigger or the 2^30-byte volume trigger has
    /// fired since the last reseed. Every call mixes in a fresh
    /// nanosecond timestamp, whether or not a full reseed happens.
    pub fn get(&mut self, out: &mut [u8]) -> Result<(), DrngError> {
        let now = Instant::now();
        let due = reseed_is_due(now.duration_since(self.last_seeded), self.generated_bytes);

        let ns = nanos_now();
        if due {
            reseed::reseed(&mut self.state, &mut self.sources, Some(&ns))?;
            self.last_seeded = Instant::now();
            self.generated_bytes = 0;
        } else {
            self.state.seed(&ns);
        }

        self.state.generate(out)?;
        self.generated_bytes += out.len() as u64;
        Ok(())
    }

    /// Forces an immediate reseed from OS entropy, optionally mixing in
    /// caller-supplied additional input after the OS sources.
    pub fn reseed(&mut self, input: Option<&[u8]>) -> Result<(), DrngError> {
        reseed::reseed(&mut self.state, &mut self.sources, input)?;
        self.last_seeded = Instant::now();
        self.generated_bytes = 0;
        Ok(())
    }
}

impl Drop for ChaCha20Drng {
    fn drop(&mut self) {
        self.sources.release();
        os::unlock_memory(&*self.state);
    }
}

/// Encodes the crate version as `major * 1_000_000 + minor * 10_000 + patch * 100`.
pub fn version() -> u32 {
    VERSION_MAJOR * 1_000_000 + VERSION_MINOR * 10_000 + VERSION_PATCH * 100
}

/// A human-readable version string. Allocates, so it is not meant to be
/// called on the hot path.
pub fn version_string() -> String {
    format!(
        "ChaCha20 DRNG {}.{}.{}",
        VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH
    )
}

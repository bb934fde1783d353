//! Reseed orchestration: pulls fresh entropy from the compiled-in
//! sources, in the fixed policy order, and feeds it into the DRBG state.

use crate::drbg::ChaCha20State;
use crate::entropy::{EntropySource, Sources};
use crate::error::DrngError;
use zeroize::Zeroize;

const MIN_TOTAL_ENTROPY: usize = 32;

fn request_len(name: &str) -> usize {
    match name {
        "syscall" => 32,
        "jitter" => 64,
        "device" => 32,
        _ => 32,
    }
}

/// The orchestration logic shared by [`reseed`] and its tests: consults
/// each source the `visit` callback hands it, in whatever order `visit`
/// chooses to hand them, `seed`-ing `state` with whatever bytes each one
/// returns immediately (rather than batching them), and accumulating a
/// running total.
///
/// A source reporting zero bytes is skipped silently — it simply
/// contributed nothing. A source reporting an error aborts the whole
/// reseed immediately with that error. If the combined total across all
/// sources is below [`MIN_TOTAL_ENTROPY`], the reseed fails with
/// [`DrngError::EntropyShortfall`] even though every individual source
/// succeeded. Caller-supplied `additional_input`, if any, is seeded last
/// and does not count toward the entropy total.
fn run(
    state: &mut ChaCha20State,
    additional_input: Option<&[u8]>,
    mut visit: impl FnMut(&mut dyn FnMut(&str, &mut dyn EntropySource) -> bool),
) -> Result<(), DrngError> {
    let mut total = 0usize;
    let mut failure: Option<DrngError> = None;

    visit(&mut |name, source| {
        let mut buf = [0u8; 64];
        let want = request_len(name);
        let result = source.read(&mut buf[..want]);
        let outcome = match result {
            Ok(0) => true,
            Ok(n) => {
                state.seed(&buf[..n]);
                total += n;
                true
            }
            Err(e) => {
                failure = Some(e.into());
                false
            }
        };
        buf.zeroize();
        outcome
    });

    if let Some(e) = failure {
        return Err(e);
    }

    if total < MIN_TOTAL_ENTROPY {
        return Err(DrngError::EntropyShortfall);
    }

    if let Some(input) = additional_input {
        state.seed(input);
    }

    Ok(())
}

/// Reseeds `state` from the compiled-in, OS-backed `sources` in their
/// fixed policy order. See [`run`] for the accumulation and failure
/// policy.
pub(crate) fn reseed(
    state: &mut ChaCha20State,
    sources: &mut Sources,
    additional_input: Option<&[u8]>,
) -> Result<(), DrngError> {
    run(state, additional_input, |f| sources.for_each(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;

    struct MockSource {
        responses: std::vec::IntoIter<Result<usize, SourceError>>,
        fill: u8,
    }

    impl MockSource {
        fn new(fill: u8, responses: Vec<Result<usize, SourceError>>) -> Self {
            Self {
                responses: responses.into_iter(),
                fill,
            }
        }
    }

    impl EntropySource for MockSource {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
            match self.responses.next().expect("unexpected extra read call") {
                Ok(n) => {
                    buf[..n].fill(self.fill);
                    Ok(n)
                }
                Err(e) => Err(e),
            }
        }
    }

    /// Runs `run` against a fixed, named list of mock sources instead of
    /// the real OS-backed [`Sources`] composite.
    fn run_with_mocks(
        state: &mut ChaCha20State,
        additional_input: Option<&[u8]>,
        mocks: &mut [(&str, MockSource)],
    ) -> Result<(), DrngError> {
        run(state, additional_input, |f| {
            for (name, source) in mocks.iter_mut() {
                if !f(*name, source) {
                    return;
                }
            }
        })
    }

    #[test]
    fn accumulates_across_sources_and_succeeds() {
        let mut state = ChaCha20State::new();
        let mut mocks = [
            ("syscall", MockSource::new(0x11, vec![Ok(32)])),
            ("jitter", MockSource::new(0x22, vec![Ok(0)])),
            ("device", MockSource::new(0x33, vec![Ok(32)])),
        ];

        assert!(run_with_mocks(&mut state, None, &mut mocks).is_ok());
    }

    #[test]
    fn below_threshold_total_is_entropy_shortfall() {
        let mut state = ChaCha20State::new();
        let mut mocks = [
            ("syscall", MockSource::new(0x11, vec![Ok(10)])),
            ("jitter", MockSource::new(0x22, vec![Ok(0)])),
            ("device", MockSource::new(0x33, vec![Ok(5)])),
        ];

        assert_eq!(
            run_with_mocks(&mut state, None, &mut mocks),
            Err(DrngError::EntropyShortfall)
        );
    }

    #[test]
    fn a_source_error_aborts_immediately() {
        let mut state = ChaCha20State::new();
        let mut mocks = [
            ("syscall", MockSource::new(0x11, vec![Ok(32)])),
            ("jitter", MockSource::new(0x22, vec![Err(SourceError::Unavailable)])),
            ("device", MockSource::new(0x33, vec![Ok(32)])),
        ];

        assert_eq!(
            run_with_mocks(&mut state, None, &mut mocks),
            Err(DrngError::Source(SourceError::Unavailable))
        );
    }

    #[test]
    fn additional_input_is_seeded_after_sources_succeed() {
        let mut plain = ChaCha20State::new();
        let mut with_input = ChaCha20State::new();

        let mut mocks_a = [("syscall", MockSource::new(0x11, vec![Ok(32)]))];
        let mut mocks_b = [("syscall", MockSource::new(0x11, vec![Ok(32)]))];

        run_with_mocks(&mut plain, None, &mut mocks_a).unwrap();
        run_with_mocks(&mut with_input, Some(b"extra"), &mut mocks_b).unwrap();

        let mut out_plain = [0u8; 32];
        let mut out_with_input = [0u8; 32];
        plain.generate(&mut out_plain).unwrap();
        with_input.generate(&mut out_with_input).unwrap();

        assert_ne!(out_plain, out_with_input);
    }
}

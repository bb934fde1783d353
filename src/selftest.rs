//! Power-on self-test gating [`crate::handle::ChaCha20Drng::init`].
//!
//! Re-runs the same known-answer vectors exercised as unit tests in
//! [`crate::chacha20`] and [`crate::drbg`], but as a runtime check rather
//! than a compile-time one: a corrupted build (bad codegen, a bit-flipped
//! constant) fails `init` instead of silently producing wrong output.

use crate::chacha20::{self, CONSTANTS};
use crate::drbg::ChaCha20State;
use crate::error::DrngError;

fn check(condition: bool) -> Result<(), DrngError> {
    if condition {
        Ok(())
    } else {
        Err(DrngError::SelfTest)
    }
}

fn block_vector() -> Result<(), DrngError> {
    let mut state: chacha20::State = [
        CONSTANTS[0],
        CONSTANTS[1],
        CONSTANTS[2],
        CONSTANTS[3],
        0x0302_0100,
        0x0706_0504,
        0x0b0a_0908,
        0x0f0e_0d0c,
        0x1312_1110,
        0x1716_1514,
        0x1b1a_1918,
        0x1f1e_1d1c,
        0x0000_0001,
        0x0900_0000,
        0x4a00_0000,
        0x0000_0000,
    ];
    let out = chacha20::block(&mut state);
    check(out[0..4] == 0xe4e7_f110u32.to_le_bytes())?;
    check(state[12] == 2)
}

fn all_zero_vector() -> Result<(), DrngError> {
    let mut state = ChaCha20State::new();
    let mut out = [0u8; 32];
    state.generate(&mut out)?;
    check(out[0..4] == 0x76b8_e0adu32.to_le_bytes())?;
    check(out[28..32] == 0x8b77_0dc7u32.to_le_bytes())
}

fn seeded_64_byte_vector() -> Result<(), DrngError> {
    let mut state = ChaCha20State::new();
    let seed: Vec<u8> = (0u8..=0x3f).collect();
    state.seed(&seed);

    let mut out = [0u8; 64];
    state.generate(&mut out)?;
    check(out[0..4] == 0x80d5_b14du32.to_le_bytes())?;
    check(out[60..64] == 0xd1cc_379du32.to_le_bytes())
}

/// 33-byte seed, 33-byte output: exercises the non-block-aligned partial
/// tail of `generate` that a 64-byte-only check would never reach.
fn seeded_33_byte_vector() -> Result<(), DrngError> {
    let mut state = ChaCha20State::new();
    let seed: Vec<u8> = (0u8..=0x20).collect();
    state.seed(&seed);

    let mut out = [0u8; 33];
    state.generate(&mut out)?;
    check(out[0..4] == 0x0d7b_a4ecu32.to_le_bytes())?;
    check(out[29..33] == 0x9a3b_275fu32.to_le_bytes())
}

/// Runs all scripted known-answer checks, failing fast on the first
/// mismatch.
pub(crate) fn run() -> Result<(), DrngError> {
    block_vector()?;
    all_zero_vector()?;
    seeded_64_byte_vector()?;
    seeded_33_byte_vector()
}

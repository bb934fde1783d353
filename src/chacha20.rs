//! ChaCha20 block primitive
//!
//! A low-level, dependency-free implementation of the ChaCha20 block
//! function as specified in RFC 7539/8439 §2.3. It produces a single
//! 64-byte keystream block from a 16-word state and is the only place in
//! the crate where byte-swapping to little-endian happens.
//!
//! This module does not implement a stream cipher or AEAD construction —
//! it only exposes the block function the DRBG's `update`/`seed`/`generate`
//! operations are built from.

/// ChaCha20 constant words: the ASCII string `"expand 32-byte k"`
/// interpreted as four little-endian `u32` words.
pub(crate) const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// The 16-word ChaCha20 state: 4 constants, 8 key words, 1 counter word,
/// 3 nonce words, per RFC 7539 §2.3.
pub(crate) type State = [u32; 16];

#[inline(always)]
fn quarter_round(state: &mut State, a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// Applies the 20-round (10 double-round) ChaCha20 permutation in place.
fn rounds(state: &mut State) {
    for _ in 0..10 {
        // Column rounds
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        // Diagonal rounds
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

/// Runs one ChaCha20 block: mixes `state` through the permutation,
/// feed-forward adds the pre-round state, serializes the result as 64
/// little-endian bytes, and increments `state[12]` (the counter word) by
/// one.
///
/// The counter is the only part of `state` this function mutates besides
/// producing the keystream; the caller owns seeding the key/nonce/counter
/// beforehand.
pub(crate) fn block(state: &mut State) -> [u8; 64] {
    let original = *state;

    rounds(state);

    for i in 0..16 {
        state[i] = state[i].wrapping_add(original[i]);
    }

    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }

    // Restore state to its mixed (non-fed-forward) form before bumping
    // the counter: RFC 7539 defines the counter as belonging to the
    // caller's state, incremented once per block computed from it.
    *state = original;
    state[12] = state[12].wrapping_add(1);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 7539 §2.3.2 test vector.
    #[test]
    fn rfc7539_block_vector() {
        let mut state: State = [
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

        let out = block(&mut state);

        let expected_words: [u32; 16] = [
            0xe4e7_f110,
            0x1559_3bd1,
            0x1fdd_0f50,
            0xc471_20a3,
            0xc7f4_d1c7,
            0x0368_c033,
            0x9aaa_2204,
            0x4e6c_d4c3,
            0x4664_82d2,
            0x09aa_9f07,
            0x05d7_c214,
            0xa202_8bd9,
            0xd19c_12b5,
            0xb94e_16de,
            0xe883_d0cb,
            0x4e3c_50a2,
        ];
        let mut expected = [0u8; 64];
        for (chunk, word) in expected.chunks_exact_mut(4).zip(expected_words.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        assert_eq!(out, expected);
        assert_eq!(state[12], 2, "counter must advance by exactly one");
    }
}

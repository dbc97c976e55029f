//! Single-block encryption and decryption.
//!
//! Each inner round folds SubBytes, ShiftRows, MixColumns, and AddRoundKey
//! into one column-wise pass over the precomputed row tables; decryption
//! applies AddRoundKey, InvMixColumns, and the collapsed
//! InvSubBytes+InvShiftRows through a post-ShiftRows write pattern.

use crate::gf::{INV_SBOX, LMUL11, LMUL13, LMUL14, LMUL2, LMUL3, LMUL9, SBOX};
use crate::schedule::KeySchedule;

/// Largest supported block in bytes (Nb = 8).
const MAX_BLOCK: usize = 32;

#[inline]
fn xor_round_key(state: &mut [u8], round_key: &[u8]) {
    for (byte, key) in state.iter_mut().zip(round_key) {
        *byte ^= key;
    }
}

/// One inner encryption round over all columns.
fn enc_round(state: &mut [u8], round_key: &[u8], shifts: [usize; 4]) {
    let nb = state.len() / 4;
    let mut out = [0u8; MAX_BLOCK];
    for c in 0..nb {
        let s0 = SBOX[state[4 * ((c + shifts[0]) % nb)] as usize] as usize;
        let s1 = SBOX[state[4 * ((c + shifts[1]) % nb) + 1] as usize] as usize;
        let s2 = SBOX[state[4 * ((c + shifts[2]) % nb) + 2] as usize] as usize;
        let s3 = SBOX[state[4 * ((c + shifts[3]) % nb) + 3] as usize] as usize;
        out[4 * c] = LMUL2[s0] ^ LMUL3[s1] ^ s2 as u8 ^ s3 as u8 ^ round_key[4 * c];
        out[4 * c + 1] = s0 as u8 ^ LMUL2[s1] ^ LMUL3[s2] ^ s3 as u8 ^ round_key[4 * c + 1];
        out[4 * c + 2] = s0 as u8 ^ s1 as u8 ^ LMUL2[s2] ^ LMUL3[s3] ^ round_key[4 * c + 2];
        out[4 * c + 3] = LMUL3[s0] ^ s1 as u8 ^ s2 as u8 ^ LMUL2[s3] ^ round_key[4 * c + 3];
    }
    state.copy_from_slice(&out[..state.len()]);
}

/// Final encryption round: SubBytes and ShiftRows without MixColumns.
fn enc_final_round(state: &mut [u8], round_key: &[u8], shifts: [usize; 4]) {
    let nb = state.len() / 4;
    let mut out = [0u8; MAX_BLOCK];
    for c in 0..nb {
        for (row, shift) in shifts.iter().enumerate() {
            out[4 * c + row] =
                SBOX[state[4 * ((c + shift) % nb) + row] as usize] ^ round_key[4 * c + row];
        }
    }
    state.copy_from_slice(&out[..state.len()]);
}

/// Collapsed InvShiftRows + InvSubBytes: each source column scatters to its
/// shifted destination while passing through the inverse S-box.
fn inv_shift_sub(state: &mut [u8], shifts: [usize; 4]) {
    let nb = state.len() / 4;
    let mut out = [0u8; MAX_BLOCK];
    for c in 0..nb {
        for (row, shift) in shifts.iter().enumerate() {
            out[4 * ((c + shift) % nb) + row] = INV_SBOX[state[4 * c + row] as usize];
        }
    }
    state.copy_from_slice(&out[..state.len()]);
}

/// One inner decryption round: AddRoundKey, InvMixColumns, then the
/// collapsed InvShiftRows + InvSubBytes write pattern.
fn dec_round(state: &mut [u8], round_key: &[u8], shifts: [usize; 4]) {
    xor_round_key(state, round_key);
    let nb = state.len() / 4;
    let mut out = [0u8; MAX_BLOCK];
    for c in 0..nb {
        let a0 = state[4 * c] as usize;
        let a1 = state[4 * c + 1] as usize;
        let a2 = state[4 * c + 2] as usize;
        let a3 = state[4 * c + 3] as usize;
        let t = [
            LMUL14[a0] ^ LMUL11[a1] ^ LMUL13[a2] ^ LMUL9[a3],
            LMUL9[a0] ^ LMUL14[a1] ^ LMUL11[a2] ^ LMUL13[a3],
            LMUL13[a0] ^ LMUL9[a1] ^ LMUL14[a2] ^ LMUL11[a3],
            LMUL11[a0] ^ LMUL13[a1] ^ LMUL9[a2] ^ LMUL14[a3],
        ];
        for (row, shift) in shifts.iter().enumerate() {
            out[4 * ((c + shift) % nb) + row] = INV_SBOX[t[row] as usize];
        }
    }
    state.copy_from_slice(&out[..state.len()]);
}

/// Encrypts one block in place with pre-expanded round keys.
///
/// `state` must be exactly Nb·4 bytes for the schedule's block size.
pub fn encrypt_block(state: &mut [u8], schedule: &KeySchedule) {
    let block = schedule.block_size();
    assert_eq!(state.len(), block.bytes(), "state must be one full block");
    let shifts = block.row_shifts();

    xor_round_key(state, schedule.round_key(0));
    for round in 1..schedule.rounds() {
        enc_round(state, schedule.round_key(round), shifts);
    }
    enc_final_round(state, schedule.round_key(schedule.rounds()), shifts);
}

/// Decrypts one block in place with pre-expanded round keys.
///
/// `state` must be exactly Nb·4 bytes for the schedule's block size.
pub fn decrypt_block(state: &mut [u8], schedule: &KeySchedule) {
    let block = schedule.block_size();
    assert_eq!(state.len(), block.bytes(), "state must be one full block");
    let shifts = block.row_shifts();

    xor_round_key(state, schedule.round_key(schedule.rounds()));
    inv_shift_sub(state, shifts);
    for round in (1..schedule.rounds()).rev() {
        dec_round(state, schedule.round_key(round), shifts);
    }
    xor_round_key(state, schedule.round_key(0));
}

//! Cipher Block Chaining.
//!
//! Plaintext is padded with zero bytes to a block boundary, which makes a
//! trailing all-zero plaintext indistinguishable from padding. Callers that
//! need the exact length back must record it out of band; the container
//! framer does so with a decimal length prefix.

use rijndael_core::{decrypt_block, encrypt_block, KeySchedule};

use crate::error::{Error, Result};

/// Encrypts `plaintext` in CBC mode.
///
/// The output is `⌈len/block⌉` blocks; the IV is consumed but not
/// prepended. `iv` must be exactly one block.
pub fn cbc_encrypt(plaintext: &[u8], iv: &[u8], schedule: &KeySchedule) -> Vec<u8> {
    let block = schedule.block_size().bytes();
    assert_eq!(iv.len(), block, "IV must be one full block");

    let padded_len = plaintext.len().div_ceil(block) * block;
    let mut out = vec![0u8; padded_len];
    out[..plaintext.len()].copy_from_slice(plaintext);

    let mut prev = iv.to_vec();
    for chunk in out.chunks_mut(block) {
        for (byte, p) in chunk.iter_mut().zip(&prev) {
            *byte ^= p;
        }
        encrypt_block(chunk, schedule);
        prev.copy_from_slice(chunk);
    }
    out
}

/// Decrypts a CBC ciphertext, returning the zero-padded plaintext.
///
/// # Errors
///
/// [`Error::BadCiphertextLength`] when the input is not a whole number of
/// blocks.
pub fn cbc_decrypt(ciphertext: &[u8], iv: &[u8], schedule: &KeySchedule) -> Result<Vec<u8>> {
    let block = schedule.block_size().bytes();
    assert_eq!(iv.len(), block, "IV must be one full block");
    if ciphertext.len() % block != 0 {
        return Err(Error::BadCiphertextLength {
            len: ciphertext.len(),
            block,
        });
    }

    let mut out = ciphertext.to_vec();
    let mut prev = iv.to_vec();
    for chunk in out.chunks_mut(block) {
        let next_prev = chunk.to_vec();
        decrypt_block(chunk, schedule);
        for (byte, p) in chunk.iter_mut().zip(&prev) {
            *byte ^= p;
        }
        prev = next_prev;
    }
    Ok(out)
}

//! Rijndael key expansion.

use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::gf::{gf_mul, SBOX};
use crate::size::{BlockSize, KeySize};

/// Expanded round keys for one (key, block size) pair.
///
/// The schedule holds Nb·(Nr+1) words laid out as Nr+1 consecutive
/// Nb·4-byte round-key blocks. It is sensitive material and wipes itself
/// on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct KeySchedule {
    words: Vec<u8>,
    block: BlockSize,
    rounds: usize,
}

impl KeySchedule {
    /// Returns the round-key block for the requested round (0..=Nr).
    #[inline]
    pub fn round_key(&self, round: usize) -> &[u8] {
        let len = self.block.bytes();
        &self.words[round * len..(round + 1) * len]
    }

    /// Returns the block size this schedule was expanded for.
    #[inline]
    pub fn block_size(&self) -> BlockSize {
        self.block
    }

    /// Returns Nr, the number of rounds.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl Drop for KeySchedule {
    fn drop(&mut self) {
        self.words.zeroize();
    }
}

impl core::fmt::Debug for KeySchedule {
    // Never prints key material.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeySchedule")
            .field("block", &self.block)
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

/// Expands a raw key into the round-key schedule for the given block size.
///
/// Nr = max(Nb, Nk) + 6. The first Nk words are the key itself; each later
/// word is `w[i-Nk] ^ f(w[i-1])` where `f` rotates, substitutes, and adds
/// the round constant on Nk-word boundaries, applies `SubWord` alone when
/// Nk > 6 and i mod Nk = 4, and is the identity otherwise.
///
/// # Errors
///
/// [`Error::InvalidKeyLength`] when the key is not 16, 24, or 32 bytes.
pub fn expand_key(key: &[u8], block: BlockSize) -> Result<KeySchedule> {
    let key_size = KeySize::from_bytes(key.len())?;
    let nk = key_size.words();
    let nb = block.words();
    let rounds = nb.max(nk) + 6;
    let total_words = nb * (rounds + 1);

    let mut words = vec![0u8; total_words * 4];
    words[..key.len()].copy_from_slice(key);

    // Round constant; doubles in GF(2⁸) each use (…, 0x80, 0x1b, 0x36, …).
    let mut rcon: u8 = 0x01;

    for i in nk..total_words {
        let mut temp = [0u8; 4];
        temp.copy_from_slice(&words[(i - 1) * 4..i * 4]);

        if i % nk == 0 {
            temp.rotate_left(1);
            for byte in temp.iter_mut() {
                *byte = SBOX[*byte as usize];
            }
            temp[0] ^= rcon;
            rcon = gf_mul(rcon, 2);
        } else if nk > 6 && i % nk == 4 {
            for byte in temp.iter_mut() {
                *byte = SBOX[*byte as usize];
            }
        }

        for (j, byte) in temp.iter().enumerate() {
            words[i * 4 + j] = words[(i - nk) * 4 + j] ^ byte;
        }
    }

    Ok(KeySchedule {
        words,
        block,
        rounds,
    })
}

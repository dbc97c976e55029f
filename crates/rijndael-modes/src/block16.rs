//! Shared 128-bit block helpers for PMAC and OCB2.

use rijndael_core::{decrypt_block, encrypt_block, BlockSize, KeySchedule};

use crate::error::{Error, Result};
use crate::gf128::Block16;

/// Rejects schedules not expanded for the 128-bit block.
pub(crate) fn require_b128(schedule: &KeySchedule) -> Result<()> {
    let block = schedule.block_size();
    if block != BlockSize::B128 {
        return Err(Error::Cipher(rijndael_core::Error::InvalidBlockSize {
            words: block.words(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn xor_into(dst: &mut Block16, rhs: &Block16) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= r;
    }
}

#[inline]
pub(crate) fn xor16(a: &Block16, b: &Block16) -> Block16 {
    let mut out = *a;
    xor_into(&mut out, b);
    out
}

#[inline]
pub(crate) fn encrypt16(block: &Block16, schedule: &KeySchedule) -> Block16 {
    let mut out = *block;
    encrypt_block(&mut out, schedule);
    out
}

#[inline]
pub(crate) fn decrypt16(block: &Block16, schedule: &KeySchedule) -> Block16 {
    let mut out = *block;
    decrypt_block(&mut out, schedule);
    out
}

//! Parallelizable MAC over associated data, as consumed by OCB2.

use rijndael_core::KeySchedule;
use zeroize::Zeroize;

use crate::block16::{encrypt16, require_b128, xor16, xor_into};
use crate::error::Result;
use crate::gf128::{double, triple, Block16};

/// Computes the PMAC tag of `header`.
///
/// `header` must be non-empty; OCB callers skip PMAC entirely for empty
/// associated data. The schedule must be expanded for the 128-bit block.
///
/// # Errors
///
/// [`rijndael_core::Error::InvalidBlockSize`] (wrapped) for non-128-bit
/// schedules.
pub fn pmac(header: &[u8], schedule: &KeySchedule) -> Result<Block16> {
    require_b128(schedule)?;
    assert!(!header.is_empty(), "PMAC requires non-empty input");

    let mut offset = triple(&triple(&encrypt16(&[0u8; 16], schedule)));
    let mut checksum = [0u8; 16];

    let blocks = header.len().div_ceil(16);
    for chunk in header.chunks(16).take(blocks - 1) {
        let mut block = [0u8; 16];
        block.copy_from_slice(chunk);
        offset = double(&offset);
        let enc = encrypt16(&xor16(&offset, &block), schedule);
        xor_into(&mut checksum, &enc);
    }

    let tail = &header[(blocks - 1) * 16..];
    offset = double(&offset);
    if tail.len() == 16 {
        offset = triple(&offset);
        let mut block = [0u8; 16];
        block.copy_from_slice(tail);
        xor_into(&mut checksum, &block);
    } else {
        offset = triple(&triple(&offset));
        let mut block = [0u8; 16];
        block[..tail.len()].copy_from_slice(tail);
        block[tail.len()] = 0x80;
        xor_into(&mut checksum, &block);
    }

    let tag = encrypt16(&xor16(&offset, &checksum), schedule);
    offset.zeroize();
    checksum.zeroize();
    Ok(tag)
}

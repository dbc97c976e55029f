//! Offset Codebook Mode 2.0 authenticated encryption.
//!
//! Each block's offset is the doubling walk L, double(L), double²(L), … of
//! L = E(IV), so blocks are independent in principle; this implementation
//! runs them sequentially and produces the byte-exact sequential result.
//! The 128-bit block is mandatory.

use rijndael_core::KeySchedule;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::block16::{decrypt16, encrypt16, require_b128, xor16, xor_into};
use crate::error::{Error, Result};
use crate::gf128::{double, triple, Block16};
use crate::pmac::pmac;

/// Big-endian block-wide encoding of the bit length of the final block.
fn length_block(bytes: usize) -> Block16 {
    let mut out = [0u8; 16];
    out[8..].copy_from_slice(&((bytes as u64) * 8).to_be_bytes());
    out
}

/// Encrypts `plaintext`, authenticating it together with `header`.
///
/// Returns the ciphertext (same length as the plaintext) and the 16-byte
/// tag. An empty `header` contributes nothing to the tag.
///
/// # Errors
///
/// [`rijndael_core::Error::InvalidBlockSize`] (wrapped) for non-128-bit
/// schedules.
pub fn ocb_encrypt(
    header: &[u8],
    plaintext: &[u8],
    iv: &Block16,
    schedule: &KeySchedule,
) -> Result<(Vec<u8>, Block16)> {
    require_b128(schedule)?;

    let mut offset = encrypt16(iv, schedule);
    let mut checksum = [0u8; 16];
    let mut ciphertext = Vec::with_capacity(plaintext.len());

    let blocks = plaintext.len().div_ceil(16).max(1);
    for chunk in plaintext.chunks(16).take(blocks - 1) {
        let mut block = [0u8; 16];
        block.copy_from_slice(chunk);
        offset = double(&offset);
        xor_into(&mut checksum, &block);
        let enc = xor16(&offset, &encrypt16(&xor16(&offset, &block), schedule));
        ciphertext.extend_from_slice(&enc);
    }

    let tail = &plaintext[(blocks - 1) * 16..];
    offset = double(&offset);
    let pad = encrypt16(&xor16(&offset, &length_block(tail.len())), schedule);
    for (p, m) in tail.iter().zip(pad.iter()) {
        ciphertext.push(p ^ m);
    }
    // Final checksum block: the short tail extended with the unused pad bytes.
    for (i, slot) in checksum.iter_mut().enumerate() {
        *slot ^= if i < tail.len() { tail[i] } else { pad[i] };
    }

    offset = triple(&offset);
    let mut tag = encrypt16(&xor16(&checksum, &offset), schedule);
    if !header.is_empty() {
        xor_into(&mut tag, &pmac(header, schedule)?);
    }

    offset.zeroize();
    checksum.zeroize();
    Ok((ciphertext, tag))
}

/// Decrypts and verifies an OCB ciphertext.
///
/// On tag mismatch the recovered plaintext is wiped and
/// [`Error::AuthenticationFailed`] is returned; no partial result escapes.
pub fn ocb_decrypt(
    header: &[u8],
    ciphertext: &[u8],
    tag: &Block16,
    iv: &Block16,
    schedule: &KeySchedule,
) -> Result<Vec<u8>> {
    require_b128(schedule)?;

    let mut offset = encrypt16(iv, schedule);
    let mut checksum = [0u8; 16];
    let mut plaintext = Vec::with_capacity(ciphertext.len());

    let blocks = ciphertext.len().div_ceil(16).max(1);
    for chunk in ciphertext.chunks(16).take(blocks - 1) {
        let mut block = [0u8; 16];
        block.copy_from_slice(chunk);
        offset = double(&offset);
        let dec = xor16(&offset, &decrypt16(&xor16(&offset, &block), schedule));
        xor_into(&mut checksum, &dec);
        plaintext.extend_from_slice(&dec);
    }

    let tail = &ciphertext[(blocks - 1) * 16..];
    offset = double(&offset);
    let pad = encrypt16(&xor16(&offset, &length_block(tail.len())), schedule);
    for (c, m) in tail.iter().zip(pad.iter()) {
        plaintext.push(c ^ m);
    }
    let recovered_tail = &plaintext[(blocks - 1) * 16..];
    for (i, slot) in checksum.iter_mut().enumerate() {
        *slot ^= if i < recovered_tail.len() {
            recovered_tail[i]
        } else {
            pad[i]
        };
    }

    offset = triple(&offset);
    let mut expected = encrypt16(&xor16(&checksum, &offset), schedule);
    if !header.is_empty() {
        xor_into(&mut expected, &pmac(header, schedule)?);
    }

    offset.zeroize();
    checksum.zeroize();
    if expected[..].ct_eq(&tag[..]).unwrap_u8() == 0 {
        plaintext.zeroize();
        expected.zeroize();
        return Err(Error::AuthenticationFailed);
    }
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rijndael_core::{expand_key, BlockSize};
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn schedule() -> KeySchedule {
        expand_key(&[0u8; 16], BlockSize::B128).unwrap()
    }

    #[test]
    fn empty_message_tag_matches_the_construction() {
        // With no plaintext and no header the tag collapses to
        // E(triple(double(E(iv))) ⊕ pad), pad = E(double(E(iv)) ⊕ len(0)).
        let schedule = schedule();
        let iv = [0u8; 16];
        let (ciphertext, tag) = ocb_encrypt(b"", b"", &iv, &schedule).unwrap();
        assert!(ciphertext.is_empty());

        let l = encrypt16(&iv, &schedule);
        let l_dollar = double(&l);
        let pad = encrypt16(&xor16(&l_dollar, &length_block(0)), &schedule);
        let expected = encrypt16(&xor16(&triple(&l_dollar), &pad), &schedule);
        assert_eq!(tag, expected);
    }

    #[test]
    fn round_trip_across_lengths() {
        let schedule = schedule();
        let mut rng = ChaCha20Rng::from_seed([21u8; 32]);
        for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 100] {
            let mut plaintext = vec![0u8; len];
            rng.fill_bytes(&mut plaintext);
            let mut iv = [0u8; 16];
            rng.fill_bytes(&mut iv);

            let (ciphertext, tag) =
                ocb_encrypt(b"header line\n", &plaintext, &iv, &schedule).unwrap();
            assert_eq!(ciphertext.len(), plaintext.len());
            let decrypted =
                ocb_decrypt(b"header line\n", &ciphertext, &tag, &iv, &schedule).unwrap();
            assert_eq!(decrypted, plaintext);
        }
    }

    #[test]
    fn empty_header_skips_the_header_tag() {
        let schedule = schedule();
        let iv = [1u8; 16];
        let (ct_a, tag_a) = ocb_encrypt(b"", b"payload", &iv, &schedule).unwrap();
        let (ct_b, tag_b) = ocb_encrypt(b"hdr", b"payload", &iv, &schedule).unwrap();
        assert_eq!(ct_a, ct_b);
        assert_ne!(tag_a, tag_b);
    }

    #[test]
    fn ciphertext_tampering_is_rejected() {
        let schedule = schedule();
        let iv = [2u8; 16];
        let plaintext = b"an authenticated message spanning blocks";
        let (ciphertext, tag) = ocb_encrypt(b"hdr", plaintext, &iv, &schedule).unwrap();

        for i in 0..ciphertext.len() {
            let mut tampered = ciphertext.clone();
            tampered[i] ^= 0x01;
            let err = ocb_decrypt(b"hdr", &tampered, &tag, &iv, &schedule).unwrap_err();
            assert_eq!(err, Error::AuthenticationFailed);
        }
    }

    #[test]
    fn header_tampering_is_rejected() {
        let schedule = schedule();
        let iv = [3u8; 16];
        let (ciphertext, tag) = ocb_encrypt(b"hdr", b"payload", &iv, &schedule).unwrap();
        let err = ocb_decrypt(b"hdR", &ciphertext, &tag, &iv, &schedule).unwrap_err();
        assert_eq!(err, Error::AuthenticationFailed);
    }

    #[test]
    fn tag_tampering_is_rejected() {
        let schedule = schedule();
        let iv = [4u8; 16];
        let (ciphertext, mut tag) = ocb_encrypt(b"", b"payload", &iv, &schedule).unwrap();
        tag[0] ^= 0x80;
        let err = ocb_decrypt(b"", &ciphertext, &tag, &iv, &schedule).unwrap_err();
        assert_eq!(err, Error::AuthenticationFailed);
    }

    #[test]
    fn rejects_wide_block_schedules() {
        let wide = expand_key(&[0u8; 32], BlockSize::B256).unwrap();
        let iv = [0u8; 16];
        assert!(ocb_encrypt(b"", b"data", &iv, &wide).is_err());
    }
}

//! Password-derived keys.
//!
//! # Warning
//!
//! This derivation is reproduced byte-for-byte for interoperability with
//! existing containers and is weak by modern standards: it uses no salt,
//! no iteration count, and keys the cipher with the password itself. Do
//! not adopt it for new formats.

use rijndael_core::{expand_key, BlockSize, KeySchedule, KeySize};
use zeroize::Zeroizing;

use crate::cbc::cbc_encrypt;
use crate::error::Result;

/// Derives an Nk·4-byte key from a password.
///
/// The password is right-padded with zero bytes to a key-size multiple (at
/// least one block, so the empty password is well-defined), a schedule is
/// built from the first Nk·4 padded bytes, the padded password is
/// CBC-encrypted under that schedule with an all-zero IV and Nb = Nk, and
/// the final block of the output is the key.
pub fn derive_key(password: &[u8], key_size: KeySize) -> Result<Zeroizing<Vec<u8>>> {
    let key_bytes = key_size.bytes();
    // Block size always validates: Nk and Nb share the {4, 6, 8} domain.
    let block = BlockSize::from_words(key_size.words())?;

    let padded_len = password.len().div_ceil(key_bytes).max(1) * key_bytes;
    let mut padded = Zeroizing::new(vec![0u8; padded_len]);
    padded[..password.len()].copy_from_slice(password);

    let schedule: KeySchedule = expand_key(&padded[..key_bytes], block)?;
    let iv = vec![0u8; key_bytes];
    let ciphertext = Zeroizing::new(cbc_encrypt(&padded, &iv, &schedule));

    Ok(Zeroizing::new(
        ciphertext[ciphertext.len() - key_bytes..].to_vec(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_key(b"correct horse battery staple", KeySize::K128).unwrap();
        let b = derive_key(b"correct horse battery staple", KeySize::K128).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn output_length_follows_key_size() {
        assert_eq!(derive_key(b"pw", KeySize::K192).unwrap().len(), 24);
        assert_eq!(derive_key(b"pw", KeySize::K256).unwrap().len(), 32);
    }

    #[test]
    fn matches_the_self_cbc_construction() {
        let password = b"a password longer than sixteen bytes";
        let key = derive_key(password, KeySize::K128).unwrap();

        let mut padded = vec![0u8; 48];
        padded[..password.len()].copy_from_slice(password);
        let schedule = expand_key(&padded[..16], BlockSize::B128).unwrap();
        let ciphertext = cbc_encrypt(&padded, &[0u8; 16], &schedule);
        assert_eq!(&key[..], &ciphertext[32..]);
    }

    #[test]
    fn empty_password_is_defined() {
        let key = derive_key(b"", KeySize::K128).unwrap();
        assert_eq!(key.len(), 16);
        // Padding the empty password gives one zero block keyed by zeros.
        let schedule = expand_key(&[0u8; 16], BlockSize::B128).unwrap();
        let ciphertext = cbc_encrypt(&[0u8; 16], &[0u8; 16], &schedule);
        assert_eq!(&key[..], &ciphertext[..]);
    }

    #[test]
    fn different_passwords_differ() {
        let a = derive_key(b"alpha", KeySize::K128).unwrap();
        let b = derive_key(b"alphb", KeySize::K128).unwrap();
        assert_ne!(a, b);
    }
}

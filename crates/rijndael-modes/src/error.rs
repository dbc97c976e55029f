//! Error type for the modes of operation.

use thiserror::Error;

/// Result alias for mode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by CBC, OCB2, and the key derivation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Ciphertext is not a whole number of blocks.
    #[error("ciphertext length {len} is not a multiple of the {block}-byte block")]
    BadCiphertextLength {
        /// The offending ciphertext length in bytes.
        len: usize,
        /// The block size in bytes.
        block: usize,
    },

    /// OCB tag verification failed; the plaintext is withheld.
    #[error("authentication tag mismatch")]
    AuthenticationFailed,

    /// Parameter validation failed in the cipher primitive.
    #[error(transparent)]
    Cipher(#[from] rijndael_core::Error),
}

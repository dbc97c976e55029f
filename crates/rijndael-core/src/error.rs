//! Error type for the cipher primitive.

use thiserror::Error;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by key expansion and parameter validation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Key length is not 16, 24, or 32 bytes.
    #[error("invalid key length: {bytes} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength {
        /// The offending key length in bytes.
        bytes: usize,
    },

    /// Block size is not 4, 6, or 8 words, or a mode rejected it.
    #[error("invalid block size: {words} words (expected 4, 6, or 8)")]
    InvalidBlockSize {
        /// The offending block size in 32-bit words.
        words: usize,
    },
}

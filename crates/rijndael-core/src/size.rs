//! Block and key size parameters.
//!
//! Rijndael is parameterized over both dimensions in 32-bit words:
//! Nb, Nk ∈ {4, 6, 8}. AES is the Nb = 4 subset.

use crate::error::{Error, Result};

/// Block size (Nb) in 32-bit words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockSize {
    /// 128-bit block (Nb = 4).
    B128,
    /// 192-bit block (Nb = 6).
    B192,
    /// 256-bit block (Nb = 8).
    B256,
}

impl BlockSize {
    /// Returns Nb, the block size in 32-bit words.
    #[inline]
    pub const fn words(self) -> usize {
        match self {
            Self::B128 => 4,
            Self::B192 => 6,
            Self::B256 => 8,
        }
    }

    /// Returns the block size in bytes.
    #[inline]
    pub const fn bytes(self) -> usize {
        self.words() * 4
    }

    /// Validates a word count into a block size.
    pub fn from_words(words: usize) -> Result<Self> {
        match words {
            4 => Ok(Self::B128),
            6 => Ok(Self::B192),
            8 => Ok(Self::B256),
            _ => Err(Error::InvalidBlockSize { words }),
        }
    }

    /// ShiftRows offsets per row. Row 0 never shifts; rows 1–3 shift by
    /// (1,2,3) for Nb ∈ {4,6} and by (1,3,4) for Nb = 8.
    #[inline]
    pub(crate) const fn row_shifts(self) -> [usize; 4] {
        match self {
            Self::B128 | Self::B192 => [0, 1, 2, 3],
            Self::B256 => [0, 1, 3, 4],
        }
    }
}

/// Key size (Nk) in 32-bit words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key (Nk = 4).
    K128,
    /// 192-bit key (Nk = 6).
    K192,
    /// 256-bit key (Nk = 8).
    K256,
}

impl KeySize {
    /// Returns Nk, the key size in 32-bit words.
    #[inline]
    pub const fn words(self) -> usize {
        match self {
            Self::K128 => 4,
            Self::K192 => 6,
            Self::K256 => 8,
        }
    }

    /// Returns the key size in bytes.
    #[inline]
    pub const fn bytes(self) -> usize {
        self.words() * 4
    }

    /// Validates a word count into a key size.
    pub fn from_words(words: usize) -> Result<Self> {
        match words {
            4 => Ok(Self::K128),
            6 => Ok(Self::K192),
            8 => Ok(Self::K256),
            _ => Err(Error::InvalidKeyLength { bytes: words * 4 }),
        }
    }

    /// Validates a raw key length in bytes into a key size.
    pub fn from_bytes(bytes: usize) -> Result<Self> {
        match bytes {
            16 => Ok(Self::K128),
            24 => Ok(Self::K192),
            32 => Ok(Self::K256),
            _ => Err(Error::InvalidKeyLength { bytes }),
        }
    }
}

//! Parameterized Rijndael block cipher primitive.
//!
//! This crate implements the full Rijndael design space (block and key
//! sizes of 128, 192, or 256 bits independently), of which AES is the
//! 128-bit-block subset. It provides:
//! - GF(2⁸) tables, the S-box pair, and the row-multiplication tables.
//! - The key schedule for every (Nb, Nk) combination.
//! - Single-block encryption and decryption.
//!
//! The implementation aims for clarity and testability rather than
//! constant-time guarantees; table lookups are indexed by secret data, so
//! it must not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
mod gf;
mod schedule;
mod size;

pub use crate::cipher::{decrypt_block, encrypt_block};
pub use crate::error::{Error, Result};
pub use crate::gf::{inv_sbox, sbox};
pub use crate::schedule::{expand_key, KeySchedule};
pub use crate::size::{BlockSize, KeySize};

//! Modes of operation for the Rijndael primitive.
//!
//! - CBC for confidentiality-only block chaining.
//! - OCB2 authenticated encryption with PMAC over associated data
//!   (128-bit blocks only).
//! - The password-derived key used by the container format.
//!
//! All mode state is sequential and owned by a single call; sensitive
//! intermediates (offsets, checksums, derived keys, plaintext rejected by
//! tag verification) are zeroized before return.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block16;
mod cbc;
mod error;
pub mod gf128;
mod kdf;
mod ocb;
mod pmac;

pub use crate::cbc::{cbc_decrypt, cbc_encrypt};
pub use crate::error::{Error, Result};
pub use crate::kdf::derive_key;
pub use crate::ocb::{ocb_decrypt, ocb_encrypt};
pub use crate::pmac::pmac;

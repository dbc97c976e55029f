//! Text container framing for Rijndael-encrypted payloads.
//!
//! This crate owns the boundary between the cryptographic primitives and
//! text: a plaintext header line describing mode, sizes, and encoding,
//! followed by the (optionally base64) payload. It also hosts the
//! high-level password [`encrypt`] / [`decrypt`] entry points and the
//! [`RandomSource`] seam they draw IVs from.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod envelope;
mod error;
mod header;
mod random;

pub use crate::envelope::{decrypt, encrypt, ModeChoice, Options, AUTO_OCB_LIMIT};
pub use crate::error::{Error, Result};
pub use crate::header::{CharMarker, Encoding, Header, Mode, MAGIC};
pub use crate::random::RandomSource;

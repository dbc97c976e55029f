//! Umbrella crate for the Rijndael suite.
//!
//! Re-exports the three library layers so applications can depend on a
//! single crate: the block primitive, the modes of operation, and the
//! text container format.

#![forbid(unsafe_code)]

pub use rijndael_core as cipher;
pub use rijndael_envelope as envelope;
pub use rijndael_modes as modes;

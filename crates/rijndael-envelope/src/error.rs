//! Error type for the container layer.

use thiserror::Error;

/// Result alias for container operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by container parsing, decoding, and decryption.
#[derive(Debug, Error)]
pub enum Error {
    /// The header line does not match
    /// `aes-encrypted V 1.2-(CBC|OCB)-(B|N)-(4|6|8)-(4|6|8)-(M|U)\n`.
    #[error("malformed container header")]
    BadHeader,

    /// The payload fails base64 decoding.
    #[error("payload is not valid base64")]
    BadBase64(#[from] base64::DecodeError),

    /// The container is shorter than its IV (and, for OCB, tag) prefix.
    #[error("container truncated: {len} bytes, need at least {min}")]
    BadCiphertextLength {
        /// Payload length in bytes.
        len: usize,
        /// Minimum bytes required by the mode's prefix.
        min: usize,
    },

    /// A CBC plaintext does not begin with `<digits>\n`.
    #[error("decrypted payload lacks a decimal length prefix")]
    LengthPrefixMissing,

    /// An error from the modes layer, including `AuthenticationFailed`.
    #[error(transparent)]
    Mode(#[from] rijndael_modes::Error),

    /// A parameter error from the cipher primitive.
    #[error(transparent)]
    Cipher(#[from] rijndael_core::Error),
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        use Error::*;
        match (self, other) {
            (BadHeader, BadHeader) | (LengthPrefixMissing, LengthPrefixMissing) => true,
            (BadBase64(a), BadBase64(b)) => a == b,
            (
                BadCiphertextLength { len: a, min: b },
                BadCiphertextLength { len: c, min: d },
            ) => a == c && b == d,
            (Mode(a), Mode(b)) => a == b,
            (Cipher(a), Cipher(b)) => a == b,
            _ => false,
        }
    }
}

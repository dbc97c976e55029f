//! The plaintext header line that fronts every container.
//!
//! `aes-encrypted V 1.2-<MODE>-<ENC>-<Nb>-<Nk>-<CHR>\n`: mode, payload
//! encoding, block and key size in words, and the character-width marker
//! the host uses to reinterpret decrypted bytes. The marker is stored
//! verbatim; this layer never interprets it.

use rijndael_core::{BlockSize, Error as CipherError, KeySize};

use crate::error::{Error, Result};

/// Version magic opening every header line.
pub const MAGIC: &str = "aes-encrypted V 1.2";

/// Mode of operation recorded in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Cipher Block Chaining, confidentiality only.
    Cbc,
    /// OCB2 authenticated encryption.
    Ocb,
}

impl Mode {
    fn field(self) -> &'static str {
        match self {
            Self::Cbc => "CBC",
            Self::Ocb => "OCB",
        }
    }
}

/// Payload encoding recorded in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// Base64 text payload (`B`).
    Base64,
    /// Raw byte payload (`N`).
    Raw,
}

impl Encoding {
    fn field(self) -> &'static str {
        match self {
            Self::Base64 => "B",
            Self::Raw => "N",
        }
    }
}

/// Character-width marker: whether the original plaintext was multibyte
/// text. Round-tripped without interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharMarker {
    /// Multibyte/Unicode plaintext (`M`).
    Multibyte,
    /// Raw bytes (`U`).
    Unibyte,
}

impl CharMarker {
    fn field(self) -> &'static str {
        match self {
            Self::Multibyte => "M",
            Self::Unibyte => "U",
        }
    }
}

/// Parsed (or to-be-emitted) container header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Mode of operation.
    pub mode: Mode,
    /// Payload encoding.
    pub encoding: Encoding,
    /// Block size (Nb). Always 4 words when `mode` is OCB.
    pub block: BlockSize,
    /// Key size (Nk).
    pub key: KeySize,
    /// Character-width marker.
    pub marker: CharMarker,
}

impl Header {
    /// Emits the exact header line, trailing newline included.
    pub fn to_line(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}-{}\n",
            MAGIC,
            self.mode.field(),
            self.encoding.field(),
            self.block.words(),
            self.key.words(),
            self.marker.field(),
        )
    }

    /// Parses the header line at the front of `container`.
    ///
    /// Returns the header and the offset of the first payload byte.
    ///
    /// # Errors
    ///
    /// [`Error::BadHeader`] for any shape deviation;
    /// `InvalidBlockSize` (wrapped) for OCB with a block other than 4
    /// words.
    pub fn parse(container: &[u8]) -> Result<(Self, usize)> {
        // Every valid header line is 32 bytes, but scan for the newline so
        // truncation and oversized first lines both fail the same way.
        let line_end = container
            .iter()
            .take(64)
            .position(|&b| b == b'\n')
            .ok_or(Error::BadHeader)?;
        let line = core::str::from_utf8(&container[..line_end]).map_err(|_| Error::BadHeader)?;

        let fields = line.strip_prefix(MAGIC).ok_or(Error::BadHeader)?;
        let mut parts = fields.strip_prefix('-').ok_or(Error::BadHeader)?.split('-');
        let mode = match parts.next() {
            Some("CBC") => Mode::Cbc,
            Some("OCB") => Mode::Ocb,
            _ => return Err(Error::BadHeader),
        };
        let encoding = match parts.next() {
            Some("B") => Encoding::Base64,
            Some("N") => Encoding::Raw,
            _ => return Err(Error::BadHeader),
        };
        let block = match parts.next() {
            Some("4") => BlockSize::B128,
            Some("6") => BlockSize::B192,
            Some("8") => BlockSize::B256,
            _ => return Err(Error::BadHeader),
        };
        let key = match parts.next() {
            Some("4") => KeySize::K128,
            Some("6") => KeySize::K192,
            Some("8") => KeySize::K256,
            _ => return Err(Error::BadHeader),
        };
        let marker = match parts.next() {
            Some("M") => CharMarker::Multibyte,
            Some("U") => CharMarker::Unibyte,
            _ => return Err(Error::BadHeader),
        };
        if parts.next().is_some() {
            return Err(Error::BadHeader);
        }
        if mode == Mode::Ocb && block != BlockSize::B128 {
            return Err(Error::Cipher(CipherError::InvalidBlockSize {
                words: block.words(),
            }));
        }

        Ok((
            Self {
                mode,
                encoding,
                block,
                key,
                marker,
            },
            line_end + 1,
        ))
    }
}

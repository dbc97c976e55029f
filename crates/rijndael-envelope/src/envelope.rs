//! High-level password encryption into the text container.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rijndael_core::{expand_key, BlockSize, KeySize};
use rijndael_modes::{cbc_decrypt, cbc_encrypt, derive_key, ocb_decrypt, ocb_encrypt};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::header::{CharMarker, Encoding, Header, Mode};
use crate::random::RandomSource;

/// Plaintexts below this many bytes default to OCB; larger ones to CBC.
pub const AUTO_OCB_LIMIT: usize = 20_000;

/// Mode selection for [`encrypt`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeChoice {
    /// Pick OCB for plaintexts under [`AUTO_OCB_LIMIT`] bytes, CBC above.
    #[default]
    Auto,
    /// Force CBC.
    Cbc,
    /// Force OCB.
    Ocb,
}

/// Options recognized by [`encrypt`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Mode selection. Defaults to [`ModeChoice::Auto`].
    pub mode: ModeChoice,
    /// Block size. Defaults to 4 words; forced to 4 for OCB.
    pub block: BlockSize,
    /// Key size. Defaults to 4 words.
    pub key: KeySize,
    /// Payload encoding. Defaults to base64.
    pub encoding: Encoding,
    /// Character-width marker, stored verbatim. Defaults to unibyte.
    pub marker: CharMarker,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: ModeChoice::Auto,
            block: BlockSize::B128,
            key: KeySize::K128,
            encoding: Encoding::Base64,
            marker: CharMarker::Unibyte,
        }
    }
}

/// Encrypts `plaintext` under a password into a self-describing container.
///
/// The container opens with the header line, followed by the payload:
/// `iv || cbc(len \n plaintext)` for CBC, or `iv || tag || ciphertext` for
/// OCB, where the header line itself is the authenticated associated data.
/// The payload is base64-encoded unless raw output was requested. A fresh
/// IV is drawn from `random` on every call.
pub fn encrypt<R: RandomSource>(
    plaintext: &[u8],
    password: &[u8],
    options: &Options,
    random: &mut R,
) -> Result<Vec<u8>> {
    let mode = match options.mode {
        ModeChoice::Auto if plaintext.len() < AUTO_OCB_LIMIT => Mode::Ocb,
        ModeChoice::Auto => Mode::Cbc,
        ModeChoice::Cbc => Mode::Cbc,
        ModeChoice::Ocb => Mode::Ocb,
    };
    let block = match mode {
        Mode::Ocb => BlockSize::B128,
        Mode::Cbc => options.block,
    };
    let header = Header {
        mode,
        encoding: options.encoding,
        block,
        key: options.key,
        marker: options.marker,
    };
    let line = header.to_line();

    let key = derive_key(password, options.key)?;
    let schedule = expand_key(&key, block)?;

    let mut payload = vec![0u8; block.bytes()];
    random.fill(&mut payload);

    match mode {
        Mode::Cbc => {
            let mut body = format!("{}\n", plaintext.len()).into_bytes();
            body.extend_from_slice(plaintext);
            let ciphertext = cbc_encrypt(&body, &payload[..block.bytes()], &schedule);
            body.zeroize();
            payload.extend_from_slice(&ciphertext);
        }
        Mode::Ocb => {
            let mut iv = [0u8; 16];
            iv.copy_from_slice(&payload);
            let (ciphertext, tag) = ocb_encrypt(line.as_bytes(), plaintext, &iv, &schedule)?;
            payload.extend_from_slice(&tag);
            payload.extend_from_slice(&ciphertext);
        }
    }

    let mut out = line.into_bytes();
    match options.encoding {
        Encoding::Base64 => out.extend_from_slice(STANDARD.encode(&payload).as_bytes()),
        Encoding::Raw => out.extend_from_slice(&payload),
    }
    Ok(out)
}

/// Decrypts a container produced by [`encrypt`].
///
/// # Errors
///
/// The full container taxonomy: [`Error::BadHeader`], [`Error::BadBase64`],
/// [`Error::BadCiphertextLength`], [`Error::LengthPrefixMissing`], and
/// `AuthenticationFailed` (wrapped) when an OCB tag does not verify; in
/// that case no plaintext escapes and intermediate buffers are wiped.
pub fn decrypt(container: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    let (header, offset) = Header::parse(container)?;
    let payload = match header.encoding {
        Encoding::Base64 => {
            // Text containers get rewrapped by editors; ignore whitespace.
            let filtered: Vec<u8> = container[offset..]
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            STANDARD.decode(&filtered)?
        }
        Encoding::Raw => container[offset..].to_vec(),
    };

    let key = derive_key(password, header.key)?;
    match header.mode {
        Mode::Cbc => {
            let block = header.block.bytes();
            if payload.len() < block {
                return Err(Error::BadCiphertextLength {
                    len: payload.len(),
                    min: block,
                });
            }
            let schedule = expand_key(&key, header.block)?;
            let (iv, body) = payload.split_at(block);
            let mut padded = cbc_decrypt(body, iv, &schedule)?;
            let result = strip_length_prefix(&padded);
            padded.zeroize();
            result
        }
        Mode::Ocb => {
            if payload.len() < 32 {
                return Err(Error::BadCiphertextLength {
                    len: payload.len(),
                    min: 32,
                });
            }
            let schedule = expand_key(&key, BlockSize::B128)?;
            let mut iv = [0u8; 16];
            iv.copy_from_slice(&payload[..16]);
            let mut tag = [0u8; 16];
            tag.copy_from_slice(&payload[16..32]);
            let line = header.to_line();
            Ok(ocb_decrypt(
                line.as_bytes(),
                &payload[32..],
                &tag,
                &iv,
                &schedule,
            )?)
        }
    }
}

/// Recovers the exact plaintext from a zero-padded CBC body prefixed with
/// `<decimal length>\n`.
fn strip_length_prefix(padded: &[u8]) -> Result<Vec<u8>> {
    let newline = padded
        .iter()
        .position(|&b| b == b'\n')
        .ok_or(Error::LengthPrefixMissing)?;
    let digits = &padded[..newline];
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::LengthPrefixMissing);
    }
    let length: usize = core::str::from_utf8(digits)
        .expect("digits are ASCII")
        .parse()
        .map_err(|_| Error::LengthPrefixMissing)?;

    let body = &padded[newline + 1..];
    if length > body.len() {
        return Err(Error::LengthPrefixMissing);
    }
    Ok(body[..length].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const PASSWORD: &[u8] = b"correct horse battery staple";

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::from_seed([11u8; 32])
    }

    #[test]
    fn default_container_round_trips() {
        let container = encrypt(b"hello\n", PASSWORD, &Options::default(), &mut rng()).unwrap();
        let text = core::str::from_utf8(&container).unwrap();
        let (line, body) = text.split_once('\n').unwrap();
        assert_eq!(line, "aes-encrypted V 1.2-OCB-B-4-4-U");
        assert!(STANDARD.decode(body).is_ok());

        let decrypted = decrypt(&container, PASSWORD).unwrap();
        assert_eq!(decrypted, b"hello\n");
    }

    #[test]
    fn tampering_any_payload_byte_fails_authentication() {
        let container = encrypt(b"hello\n", PASSWORD, &Options::default(), &mut rng()).unwrap();
        let offset = container.iter().position(|&b| b == b'\n').unwrap() + 1;
        let payload = STANDARD.decode(&container[offset..]).unwrap();

        for i in 0..payload.len() {
            let mut tampered = payload.clone();
            tampered[i] ^= 0x01;
            let mut rebuilt = container[..offset].to_vec();
            rebuilt.extend_from_slice(STANDARD.encode(&tampered).as_bytes());
            let err = decrypt(&rebuilt, PASSWORD).unwrap_err();
            assert_eq!(
                err,
                Error::Mode(rijndael_modes::Error::AuthenticationFailed),
                "payload byte {i} tampering must be rejected"
            );
        }
    }

    #[test]
    fn auto_mode_switches_to_cbc_at_the_limit() {
        let small = vec![0x61u8; AUTO_OCB_LIMIT - 1];
        let large = vec![0x61u8; AUTO_OCB_LIMIT];
        let opts = Options {
            encoding: Encoding::Raw,
            ..Options::default()
        };
        let ocb = encrypt(&small, PASSWORD, &opts, &mut rng()).unwrap();
        let cbc = encrypt(&large, PASSWORD, &opts, &mut rng()).unwrap();
        assert!(ocb.starts_with(b"aes-encrypted V 1.2-OCB-"));
        assert!(cbc.starts_with(b"aes-encrypted V 1.2-CBC-"));
        assert_eq!(decrypt(&ocb, PASSWORD).unwrap(), small);
        assert_eq!(decrypt(&cbc, PASSWORD).unwrap(), large);
    }

    #[test]
    fn cbc_with_wide_parameters_round_trips() {
        let opts = Options {
            mode: ModeChoice::Cbc,
            block: BlockSize::B256,
            key: KeySize::K192,
            marker: CharMarker::Multibyte,
            ..Options::default()
        };
        let plaintext = "Grüße aus dem Container".as_bytes();
        let container = encrypt(plaintext, PASSWORD, &opts, &mut rng()).unwrap();
        assert!(container.starts_with(b"aes-encrypted V 1.2-CBC-B-8-6-M\n"));
        assert_eq!(decrypt(&container, PASSWORD).unwrap(), plaintext);
    }

    #[test]
    fn raw_encoding_round_trips() {
        let opts = Options {
            mode: ModeChoice::Ocb,
            encoding: Encoding::Raw,
            ..Options::default()
        };
        let container = encrypt(b"binary \x00\xff payload", PASSWORD, &opts, &mut rng()).unwrap();
        assert_eq!(decrypt(&container, PASSWORD).unwrap(), b"binary \x00\xff payload");
    }

    #[test]
    fn megabyte_cbc_payload_round_trips() {
        // The decimal length prefix has to carry a seven-digit count.
        let plaintext: Vec<u8> = (0..1_200_000u32).map(|i| (i % 251) as u8).collect();
        let opts = Options {
            mode: ModeChoice::Cbc,
            encoding: Encoding::Raw,
            ..Options::default()
        };
        let container = encrypt(&plaintext, PASSWORD, &opts, &mut rng()).unwrap();
        assert_eq!(decrypt(&container, PASSWORD).unwrap(), plaintext);
    }

    #[test]
    fn empty_plaintext_round_trips_in_both_modes() {
        for mode in [ModeChoice::Cbc, ModeChoice::Ocb] {
            let opts = Options {
                mode,
                ..Options::default()
            };
            let container = encrypt(b"", PASSWORD, &opts, &mut rng()).unwrap();
            assert_eq!(decrypt(&container, PASSWORD).unwrap(), b"");
        }
    }

    #[test]
    fn wrong_password_fails_ocb_authentication() {
        let container = encrypt(b"secret", PASSWORD, &Options::default(), &mut rng()).unwrap();
        let err = decrypt(&container, b"not the password").unwrap_err();
        assert_eq!(err, Error::Mode(rijndael_modes::Error::AuthenticationFailed));
    }

    #[test]
    fn truncated_payloads_are_reported() {
        let container = encrypt(b"secret", PASSWORD, &Options::default(), &mut rng()).unwrap();
        let offset = container.iter().position(|&b| b == b'\n').unwrap() + 1;
        let mut truncated = container[..offset].to_vec();
        truncated.extend_from_slice(STANDARD.encode(&[0u8; 20]).as_bytes());
        assert_eq!(
            decrypt(&truncated, PASSWORD).unwrap_err(),
            Error::BadCiphertextLength { len: 20, min: 32 }
        );
    }

    #[test]
    fn junk_base64_is_reported() {
        let mut container = b"aes-encrypted V 1.2-OCB-B-4-4-U\n".to_vec();
        container.extend_from_slice(b"@@@not base64@@@");
        assert!(matches!(
            decrypt(&container, PASSWORD).unwrap_err(),
            Error::BadBase64(_)
        ));
    }

    #[test]
    fn length_prefix_is_required() {
        // Hand-build a CBC container whose body was encrypted without the
        // decimal prefix; zero padding contains no newline either.
        let key = derive_key(PASSWORD, KeySize::K128).unwrap();
        let schedule = expand_key(&key, BlockSize::B128).unwrap();
        let iv = [9u8; 16];
        let mut container = b"aes-encrypted V 1.2-CBC-N-4-4-U\n".to_vec();
        container.extend_from_slice(&iv);
        container.extend_from_slice(&cbc_encrypt(b"no length here", &iv, &schedule));

        assert_eq!(
            decrypt(&container, PASSWORD).unwrap_err(),
            Error::LengthPrefixMissing
        );
    }

    #[test]
    fn every_parameter_combination_round_trips() {
        let plaintext = b"parameterized round trip \x00\x01\x02";
        let blocks = [BlockSize::B128, BlockSize::B192, BlockSize::B256];
        let keys = [KeySize::K128, KeySize::K192, KeySize::K256];
        for mode in [ModeChoice::Cbc, ModeChoice::Ocb] {
            for block in blocks {
                if mode == ModeChoice::Ocb && block != BlockSize::B128 {
                    continue;
                }
                for key in keys {
                    let opts = Options {
                        mode,
                        block,
                        key,
                        ..Options::default()
                    };
                    let container = encrypt(plaintext, PASSWORD, &opts, &mut rng()).unwrap();
                    assert_eq!(
                        decrypt(&container, PASSWORD).unwrap(),
                        plaintext,
                        "mode {mode:?}, block {block:?}, key {key:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn marker_is_round_tripped_verbatim() {
        let opts = Options {
            marker: CharMarker::Multibyte,
            ..Options::default()
        };
        let container = encrypt(b"bytes", PASSWORD, &opts, &mut rng()).unwrap();
        let (header, _) = Header::parse(&container).unwrap();
        assert_eq!(header.marker, CharMarker::Multibyte);
        assert_eq!(decrypt(&container, PASSWORD).unwrap(), b"bytes");
    }

    #[test]
    fn base64_with_line_wrapping_still_decodes() {
        let container = encrypt(b"hello\n", PASSWORD, &Options::default(), &mut rng()).unwrap();
        let offset = container.iter().position(|&b| b == b'\n').unwrap() + 1;
        let mut wrapped = container[..offset].to_vec();
        for chunk in container[offset..].chunks(8) {
            wrapped.extend_from_slice(chunk);
            wrapped.push(b'\n');
        }
        assert_eq!(decrypt(&wrapped, PASSWORD).unwrap(), b"hello\n");
    }
}

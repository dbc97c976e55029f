//! Command-line interface for the Rijndael container format.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use rijndael_core::{BlockSize, KeySize};
use rijndael_envelope::{CharMarker, Encoding, ModeChoice, Options};

/// Rijndael container CLI.
#[derive(Parser)]
#[command(
    name = "rijndael",
    version,
    author,
    about = "Password-based file encryption in the aes-encrypted container format"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file into a container.
    Encrypt {
        /// Input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output container path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Password (prefer an interactive prompt in scripts that care
        /// about shell history).
        #[arg(long)]
        password: String,
        /// Mode: auto, cbc, or ocb.
        #[arg(long, default_value = "auto")]
        mode: String,
        /// Block size in 32-bit words (4, 6, or 8; CBC only).
        #[arg(long, default_value_t = 4)]
        block_words: usize,
        /// Key size in 32-bit words (4, 6, or 8).
        #[arg(long, default_value_t = 4)]
        key_words: usize,
        /// Emit the payload as raw bytes instead of base64.
        #[arg(long, default_value_t = false)]
        raw: bool,
        /// Mark the plaintext as multibyte text in the header.
        #[arg(long, default_value_t = false)]
        multibyte: bool,
    },
    /// Decrypt a container back into a file.
    Decrypt {
        /// Input container path.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output file.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Password.
        #[arg(long)]
        password: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Encrypt {
            input,
            output,
            password,
            mode,
            block_words,
            key_words,
            raw,
            multibyte,
        } => cmd_encrypt(
            &input,
            &output,
            &password,
            &mode,
            block_words,
            key_words,
            raw,
            multibyte,
        ),
        Commands::Decrypt {
            input,
            output,
            password,
        } => cmd_decrypt(&input, &output, &password),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_encrypt(
    input: &PathBuf,
    output: &PathBuf,
    password: &str,
    mode: &str,
    block_words: usize,
    key_words: usize,
    raw: bool,
    multibyte: bool,
) -> Result<()> {
    let options = Options {
        mode: parse_mode(mode)?,
        block: BlockSize::from_words(block_words).context("invalid --block-words")?,
        key: KeySize::from_words(key_words).context("invalid --key-words")?,
        encoding: if raw { Encoding::Raw } else { Encoding::Base64 },
        marker: if multibyte {
            CharMarker::Multibyte
        } else {
            CharMarker::Unibyte
        },
    };

    let plaintext = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let container =
        rijndael_envelope::encrypt(&plaintext, password.as_bytes(), &options, &mut OsRng)
            .context("encrypt")?;
    fs::write(output, container).with_context(|| format!("write {}", output.display()))?;
    Ok(())
}

fn cmd_decrypt(input: &PathBuf, output: &PathBuf, password: &str) -> Result<()> {
    let container = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let plaintext =
        rijndael_envelope::decrypt(&container, password.as_bytes()).context("decrypt")?;
    fs::write(output, plaintext).with_context(|| format!("write {}", output.display()))?;
    Ok(())
}

fn parse_mode(mode: &str) -> Result<ModeChoice> {
    match mode {
        "auto" => Ok(ModeChoice::Auto),
        "cbc" => Ok(ModeChoice::Cbc),
        "ocb" => Ok(ModeChoice::Ocb),
        other => bail!("unknown mode {other:?} (expected auto, cbc, or ocb)"),
    }
}

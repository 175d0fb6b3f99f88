//! Encode command - hide an encrypted message in an image or WAV file.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use cloakline::{encode, max_payload_bytes, AudioCarrier, Carrier, Config, ImageCarrier};

use super::{check_output, has_png_extension, read_carrier, CarrierKind, CommandExecutor, MediaType};

/// Encrypt a message with a password and hide it in a carrier file.
///
/// Images (PNG, BMP, JPEG, ...) are written back as PNG; the alpha channel
/// is never modified. Audio must be WAV; non-16-bit input is normalized to
/// 16-bit PCM first.
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// Path to the carrier file (image or WAV)
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// Message to hide (reads from stdin if not provided)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Password used to encrypt the message
    #[arg(short, long, env = "CLOAKLINE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Output path for the stego file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Carrier type
    #[arg(long, value_enum, default_value_t = CarrierKind::Auto)]
    pub kind: CarrierKind,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let message = self.read_message()?;
        check_output(&self.output, config)?;

        let bytes = read_carrier(&self.carrier)?;

        match self.kind.resolve(&bytes) {
            MediaType::Image => {
                let carrier = ImageCarrier::from_bytes(&bytes)
                    .with_context(|| format!("Failed to load image {}", self.carrier.display()))?;
                let (width, height) = carrier.dimensions();
                let capacity = max_payload_bytes(&carrier);

                let stego = encode(carrier, &message, &self.password)
                    .context("Failed to hide message in image")?;
                stego
                    .save(&self.output)
                    .with_context(|| format!("Failed to write {}", self.output.display()))?;

                if !has_png_extension(&self.output) {
                    eprintln!("Note: output is PNG data regardless of the file extension.");
                }
                println!("Hidden message in {}x{} image", width, height);
                println!("Carrier capacity: {} payload bytes", capacity);
            }
            MediaType::Audio => {
                let carrier = AudioCarrier::from_bytes(&bytes)
                    .with_context(|| format!("Failed to load audio {}", self.carrier.display()))?;
                let capacity_bits = carrier.capacity_bits();

                let stego = encode(carrier, &message, &self.password)
                    .context("Failed to hide message in audio")?;
                stego
                    .save(&self.output)
                    .with_context(|| format!("Failed to write {}", self.output.display()))?;

                println!("Hidden message in WAV data chunk ({} bytes)", capacity_bits);
            }
        }

        println!("Output: {}", self.output.display());
        Ok(())
    }
}

impl EncodeCommand {
    /// Returns the message from the argument or stdin.
    fn read_message(&self) -> Result<String> {
        if let Some(message) = &self.message {
            return Ok(message.clone());
        }

        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read message from stdin")?;
        let message = buffer.trim_end_matches(['\r', '\n']).to_string();
        if message.is_empty() {
            bail!("No message provided (use --message or pipe it on stdin)");
        }
        Ok(message)
    }
}

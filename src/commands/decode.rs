//! Decode command - reveal a hidden message.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cloakline::{decode, AudioCarrier, Config, ImageCarrier};

use super::{read_carrier, CarrierKind, CommandExecutor, MediaType};

/// Extract and decrypt a message hidden by `encode`.
///
/// Fails with "no hidden message" when the carrier was never encoded, and
/// with "access denied" when the password is wrong or the data is corrupted.
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// Path to the stego file (image or WAV)
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// Password used when encoding
    #[arg(short, long, env = "CLOAKLINE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Carrier type
    #[arg(long, value_enum, default_value_t = CarrierKind::Auto)]
    pub kind: CarrierKind,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self, _config: &Config) -> Result<()> {
        let bytes = read_carrier(&self.carrier)?;

        // Stego audio is always canonical, so it is read as is, never normalized.
        let message = match self.kind.resolve(&bytes) {
            MediaType::Image => {
                let carrier = ImageCarrier::from_bytes(&bytes)
                    .with_context(|| format!("Failed to load image {}", self.carrier.display()))?;
                decode(&carrier, &self.password)
            }
            MediaType::Audio => {
                let carrier = AudioCarrier::from_wav(bytes)
                    .with_context(|| format!("Failed to load audio {}", self.carrier.display()))?;
                decode(&carrier, &self.password)
            }
        }
        .context("Failed to reveal message")?;

        println!("{}", message);
        Ok(())
    }
}

//! Capacity command - report how much a carrier can hold.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cloakline::crypto::max_message_bytes;
use cloakline::{max_payload_bytes, AudioCarrier, Carrier, Config, ImageCarrier};

use super::{read_carrier, CarrierKind, CommandExecutor, MediaType};

/// Show the embedding capacity of a carrier file.
#[derive(Args, Debug)]
pub struct CapacityCommand {
    /// Path to the carrier file (image or WAV)
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// Carrier type
    #[arg(long, value_enum, default_value_t = CarrierKind::Auto)]
    pub kind: CarrierKind,
}

impl CommandExecutor for CapacityCommand {
    fn execute(&self, _config: &Config) -> Result<()> {
        let bytes = read_carrier(&self.carrier)?;

        let (capacity_bits, payload_bytes) = match self.kind.resolve(&bytes) {
            MediaType::Image => {
                let carrier = ImageCarrier::from_bytes(&bytes)
                    .with_context(|| format!("Failed to load image {}", self.carrier.display()))?;
                let (width, height) = carrier.dimensions();
                println!("Type:           image ({}x{}, RGBA)", width, height);
                (carrier.capacity_bits(), max_payload_bytes(&carrier))
            }
            MediaType::Audio => {
                let carrier = AudioCarrier::from_bytes(&bytes)
                    .with_context(|| format!("Failed to load audio {}", self.carrier.display()))?;
                if let Some(format) = carrier.format() {
                    println!(
                        "Type:           audio ({} ch, {} Hz, {}-bit)",
                        format.channels, format.sample_rate, format.bits_per_sample
                    );
                }
                (carrier.capacity_bits(), max_payload_bytes(&carrier))
            }
        };

        println!("Capacity:       {} bits", capacity_bits);
        println!("Max payload:    {} bytes", payload_bytes);
        println!("Max message:    {} bytes (UTF-8)", max_message_bytes(payload_bytes));
        Ok(())
    }
}

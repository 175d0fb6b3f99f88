//! Convert command - normalize a WAV file to 16-bit PCM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cloakline::wav::{decode_wav, normalize};
use cloakline::Config;

use super::{check_output, read_carrier, CommandExecutor};

/// Re-encode a WAV file (8/24/32-bit integer or float PCM) as 16-bit PCM,
/// the layout audio carriers are embedded in.
#[derive(Args, Debug)]
pub struct ConvertCommand {
    /// Input WAV file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output WAV file
    #[arg(short, long)]
    pub output: PathBuf,
}

impl CommandExecutor for ConvertCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        check_output(&self.output, config)?;

        let bytes = read_carrier(&self.input)?;
        let audio = decode_wav(&bytes)
            .with_context(|| format!("Failed to decode {}", self.input.display()))?;
        let wav = normalize(&audio.channels, audio.sample_rate)
            .context("Failed to normalize audio")?;

        std::fs::write(&self.output, &wav)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        println!(
            "Converted {} channel(s), {:.2}s at {} Hz to 16-bit PCM",
            audio.channels.len(),
            audio.duration_secs(),
            audio.sample_rate
        );
        println!("Output: {}", self.output.display());
        Ok(())
    }
}

//! cloakline - Hide encrypted messages in images and audio
//!
//! A CLI for password-protected LSB steganography in PNG/BMP/JPEG images
//! and WAV audio.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cloakline::{Config, ConfigError};

mod commands;
mod telemetry;

use commands::{
    AdviseCommand, CapacityCommand, CommandExecutor, ConvertCommand, DecodeCommand,
    EncodeCommand,
};

/// cloakline - Hide encrypted messages in images and audio
///
/// Messages are encrypted with AES-256-GCM under a password-derived key,
/// then written into the least significant bits of the carrier.
#[derive(Parser)]
#[command(name = "cloakline")]
#[command(version)]
#[command(about = "Password-protected LSB steganography for images and WAV audio")]
#[command(long_about = None)]
struct Cli {
    /// Path to the config file (default: ~/.cloakline/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide an encrypted message in an image or WAV file
    Encode(EncodeCommand),

    /// Reveal a hidden message
    Decode(DecodeCommand),

    /// Show how much a carrier can hold
    Capacity(CapacityCommand),

    /// Normalize a WAV file to 16-bit PCM
    Convert(ConvertCommand),

    /// Assess a carrier or suggest a sample message
    Advise(AdviseCommand),
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path),
        None => match Config::load() {
            Err(ConfigError::NoConfigDir) => Ok(Config::default()),
            other => other,
        },
    };
    config.context("Failed to load configuration")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let log_level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    telemetry::init(log_level)?;

    match &cli.command {
        Commands::Encode(cmd) => cmd.execute(&config),
        Commands::Decode(cmd) => cmd.execute(&config),
        Commands::Capacity(cmd) => cmd.execute(&config),
        Commands::Convert(cmd) => cmd.execute(&config),
        Commands::Advise(cmd) => cmd.execute(&config),
    }
}

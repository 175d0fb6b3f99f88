//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod advise;
mod capacity;
mod convert;
mod decode;
mod encode;

pub use advise::AdviseCommand;
pub use capacity::CapacityCommand;
pub use convert::ConvertCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

use cloakline::Config;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self, config: &Config) -> Result<()>;
}

/// Carrier type selection on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CarrierKind {
    /// Detect from the file contents (RIFF/WAVE = audio, anything else = image)
    #[default]
    Auto,
    /// Raster image (PNG, BMP, JPEG, ...); stego output is always PNG
    Image,
    /// WAV audio; stego output is 16-bit PCM WAV
    Audio,
}

/// Carrier type after auto-detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Audio,
}

impl CarrierKind {
    /// Resolves `Auto` by sniffing the file header.
    pub fn resolve(self, bytes: &[u8]) -> MediaType {
        match self {
            Self::Auto if is_wav(bytes) => MediaType::Audio,
            Self::Auto | Self::Image => MediaType::Image,
            Self::Audio => MediaType::Audio,
        }
    }
}

fn is_wav(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}

/// Reads a carrier file into memory.
pub fn read_carrier(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read carrier {}", path.display()))
}

/// Refuses to replace an existing file unless the config allows it.
pub fn check_output(path: &Path, config: &Config) -> Result<()> {
    if path.exists() && !config.overwrite {
        bail!(
            "Output file {} already exists (set `overwrite = true` in the config to replace it)",
            path.display()
        );
    }
    Ok(())
}

/// Returns `true` when `path` ends in `.png` (any case).
///
/// Image output is PNG data whatever the extension says.
pub fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

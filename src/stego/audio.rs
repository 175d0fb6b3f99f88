//! LSB steganography for audio files.
//!
//! Hides data in the least significant bit of every byte of a WAV file's
//! `"data"` chunk, starting at the chunk's first byte. Everything outside
//! the chunk, and every chunk byte past the payload, is left as is.
//!
//! Input that is not already 16-bit PCM is decoded and normalized first, so
//! the hidden bits only ever perturb 16-bit samples.

use std::path::Path;
use tracing::debug;

use super::Carrier;
use crate::error::StegoError;
use crate::wav::{self, DataChunk, DecodedAudio, WavFormat};

/// A WAV buffer used as a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCarrier {
    wav: Vec<u8>,
    data: DataChunk,
}

impl AudioCarrier {
    /// Wraps a WAV buffer as is. Any layout with a `"data"` chunk is accepted.
    pub fn from_wav(wav: Vec<u8>) -> Result<Self, StegoError> {
        let data = wav::locate_data_chunk(&wav)?;
        Ok(Self { wav, data })
    }

    /// Normalizes decoded audio to 16-bit PCM and wraps the result.
    pub fn from_decoded(audio: &DecodedAudio) -> Result<Self, StegoError> {
        Self::from_wav(wav::normalize(&audio.channels, audio.sample_rate)?)
    }

    /// Loads WAV bytes, normalizing them unless they are already 16-bit PCM.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        if let Ok(format) = wav::read_format(bytes) {
            if wav::is_canonical(&format) {
                return Self::from_wav(bytes.to_vec());
            }
            debug!(
                format_tag = format.format_tag,
                bits_per_sample = format.bits_per_sample,
                "normalizing non-canonical WAV"
            );
        }
        Self::from_decoded(&wav::decode_wav(bytes)?)
    }

    /// Loads a WAV file, see [`AudioCarrier::from_bytes`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Location of the sample bytes.
    pub fn data_chunk(&self) -> DataChunk {
        self.data
    }

    /// Parsed `"fmt "` chunk, if present.
    pub fn format(&self) -> Option<WavFormat> {
        wav::read_format(&self.wav).ok()
    }

    /// Returns the full WAV buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.wav
    }

    /// Consumes the carrier and returns the WAV buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.wav
    }

    /// Writes the WAV buffer to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        std::fs::write(path, &self.wav)?;
        Ok(())
    }
}

impl Carrier for AudioCarrier {
    const UTILIZATION: f64 = 1.0;

    fn raw_bits(&self) -> usize {
        self.data.len
    }

    fn capacity_bits(&self) -> usize {
        self.data.len
    }

    fn read_bit(&self, slot: usize) -> u8 {
        self.wav[self.data.offset + slot] & 1
    }

    fn write_bit(&mut self, slot: usize, bit: u8) {
        let byte = &mut self.wav[self.data.offset + slot];
        // Clear LSB and set new bit
        *byte = (*byte & 0xFE) | (bit & 1);
    }
}

//! LSB (Least Significant Bit) steganography for images.
//!
//! Hides data in the least significant bits of the R, G and B bytes of an
//! RGBA pixel buffer. Alpha bytes (every 4th byte) are never touched.
//!
//! Any format the `image` crate can decode is accepted as input; output is
//! always PNG, since a lossy re-encode would destroy the hidden bits.

use image::{ColorType, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use super::Carrier;
use crate::error::StegoError;

/// Bytes per RGBA pixel.
const CHANNELS: usize = 4;

/// Usable channels per pixel (R, G, B).
const COLOR_CHANNELS: usize = 3;

/// An RGBA pixel buffer used as a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCarrier {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageCarrier {
    /// Wraps raw interleaved RGBA bytes.
    ///
    /// The buffer must hold exactly `width * height * 4` bytes.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, StegoError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| count.checked_mul(CHANNELS));
        if expected != Some(pixels.len()) {
            return Err(StegoError::InvalidCarrier(format!(
                "{}x{} RGBA image needs {} bytes, got {}",
                width,
                height,
                expected.map_or_else(|| "too many".to_string(), |n| n.to_string()),
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a carrier from a decoded RGBA image.
    pub fn from_rgba(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }

    /// Decodes an encoded image (PNG, BMP, JPEG, ...) into a carrier.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        let image =
            image::load_from_memory(bytes).map_err(|e| StegoError::ImageLoad(e.to_string()))?;
        Ok(Self::from_rgba(image.to_rgba8()))
    }

    /// Loads and decodes an image file into a carrier.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let image = image::open(path).map_err(|e| StegoError::ImageLoad(e.to_string()))?;
        Ok(Self::from_rgba(image.to_rgba8()))
    }

    /// Returns `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the interleaved RGBA bytes.
    pub fn as_rgba_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the carrier and returns the RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Encodes the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut bytes = Vec::new();
        image::write_buffer_with_format(
            &mut Cursor::new(&mut bytes),
            &self.pixels,
            self.width,
            self.height,
            ColorType::Rgba8,
            ImageFormat::Png,
        )
        .map_err(|e| StegoError::ImageSave(e.to_string()))?;
        Ok(bytes)
    }

    /// Saves the image as PNG, regardless of the path's extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        let bytes = self.to_png_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Maps a bit slot to its byte index, skipping alpha bytes.
    fn byte_index(slot: usize) -> usize {
        (slot / COLOR_CHANNELS) * CHANNELS + slot % COLOR_CHANNELS
    }
}

impl Carrier for ImageCarrier {
    const UTILIZATION: f64 = 0.75;

    fn raw_bits(&self) -> usize {
        self.pixels.len()
    }

    fn capacity_bits(&self) -> usize {
        self.pixels.len() - self.pixels.len() / CHANNELS
    }

    fn read_bit(&self, slot: usize) -> u8 {
        self.pixels[Self::byte_index(slot)] & 1
    }

    fn write_bit(&mut self, slot: usize, bit: u8) {
        let byte = &mut self.pixels[Self::byte_index(slot)];
        // Clear LSB and set new bit
        *byte = (*byte & 0xFE) | (bit & 1);
    }
}

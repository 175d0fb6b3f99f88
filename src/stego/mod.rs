//! Steganography module for hiding data in various carriers.
//!
//! Supports:
//! - Image LSB steganography (RGBA pixel buffers, saved as PNG)
//! - Audio LSB steganography (WAV data chunk bytes)
//!
//! Both carriers share one framing: a 32-bit big-endian bit count followed by
//! the payload bits, one bit per addressable carrier byte.

pub mod audio;
pub mod bits;
pub mod image;

pub use audio::AudioCarrier;
pub use bits::{capacity_check, Bitstream, HEADER_BITS};
pub use image::ImageCarrier;

use tracing::debug;

use crate::error::StegoError;

/// A byte buffer whose least significant bits can hold a payload.
///
/// Slots are numbered from zero in carrier order; slot `i` carries bit `i`
/// of the framed bitstream.
pub trait Carrier {
    /// Share of [`raw_bits`](Carrier::raw_bits) that may be used for payload.
    const UTILIZATION: f64;

    /// One candidate bit per byte of the carrier region, before any exclusion.
    fn raw_bits(&self) -> usize;

    /// Number of addressable bit slots.
    fn capacity_bits(&self) -> usize;

    /// Returns the least significant bit of slot `slot`.
    fn read_bit(&self, slot: usize) -> u8;

    /// Replaces the least significant bit of slot `slot` with `bit`.
    fn write_bit(&mut self, slot: usize, bit: u8);
}

/// Hides `payload` in `carrier` and returns the modified carrier.
///
/// The capacity check runs before any byte is touched. Slots after the
/// last payload bit are left unchanged.
pub fn embed<C: Carrier>(mut carrier: C, payload: &[u8]) -> Result<C, StegoError> {
    let stream = Bitstream::pack(payload)?;
    capacity_check(stream.bit_len(), carrier.raw_bits(), C::UTILIZATION)?;
    if stream.bit_len() > carrier.capacity_bits() {
        return Err(StegoError::CapacityExceeded {
            needed: stream.bit_len(),
            capacity: carrier.capacity_bits(),
        });
    }

    for (slot, bit) in stream.bits().enumerate() {
        carrier.write_bit(slot, bit);
    }

    debug!(
        payload_bytes = payload.len(),
        used_bits = stream.bit_len(),
        capacity_bits = carrier.capacity_bits(),
        "embedded payload"
    );

    Ok(carrier)
}

/// Extracts a payload previously hidden with [`embed`].
///
/// Fails with [`StegoError::NoHiddenData`] when the length header is zero
/// or larger than the carrier can hold. A header that is not a multiple of 8
/// is rejected the same way: [`embed`] only ever writes whole bytes, so such
/// a header is read as noise rather than handed on to decryption.
pub fn extract<C: Carrier>(carrier: &C) -> Result<Vec<u8>, StegoError> {
    let capacity = carrier.capacity_bits();
    let header = bits::read_header((0..capacity).map(|slot| carrier.read_bit(slot)))
        .ok_or(StegoError::NoHiddenData)?;

    let declared = header as usize;
    if declared == 0 || declared % 8 != 0 || declared > capacity - HEADER_BITS {
        debug!(declared, capacity, "rejected length header");
        return Err(StegoError::NoHiddenData);
    }

    let payload = bits::assemble(
        (HEADER_BITS..HEADER_BITS + declared).map(|slot| carrier.read_bit(slot)),
    );

    debug!(payload_bytes = payload.len(), "extracted payload");
    Ok(payload)
}

/// Largest payload in bytes that [`embed`] accepts for this carrier.
pub fn max_payload_bytes<C: Carrier>(carrier: &C) -> usize {
    let limit = (carrier.raw_bits() as f64 * C::UTILIZATION).floor() as usize;
    limit.min(carrier.capacity_bits()).saturating_sub(HEADER_BITS) / 8
}

//! Length-prefixed bit framing.
//!
//! Format: [32-bit big-endian payload bit count] + [payload bits]
//! Every byte is emitted most significant bit first, bytes in order.

use crate::error::StegoError;

/// Number of bits in the length header.
pub const HEADER_BITS: usize = 32;

/// A framed payload ready to be written into a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
    /// Header bytes followed by payload bytes.
    frame: Vec<u8>,
}

impl Bitstream {
    /// Frames `payload` behind its bit count.
    ///
    /// Fails with [`StegoError::CapacityExceeded`] when the bit count does not
    /// fit in the 32-bit header.
    pub fn pack(payload: &[u8]) -> Result<Self, StegoError> {
        let payload_bits = payload
            .len()
            .checked_mul(8)
            .and_then(|bits| u32::try_from(bits).ok())
            .ok_or(StegoError::CapacityExceeded {
                needed: payload.len().saturating_mul(8).saturating_add(HEADER_BITS),
                capacity: u32::MAX as usize,
            })?;

        let mut frame = Vec::with_capacity(4 + payload.len());
        frame.extend_from_slice(&payload_bits.to_be_bytes());
        frame.extend_from_slice(payload);
        Ok(Self { frame })
    }

    /// Total number of bits, header included.
    pub fn bit_len(&self) -> usize {
        self.frame.len() * 8
    }

    /// Bit count declared in the header.
    pub fn payload_bits(&self) -> usize {
        self.bit_len() - HEADER_BITS
    }

    /// Iterates over every bit (0 or 1) in transmission order.
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        self.frame
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
    }
}

/// Fails with [`StegoError::CapacityExceeded`] when `bitstream_bits` exceeds
/// `carrier_bits * utilization`.
pub fn capacity_check(
    bitstream_bits: usize,
    carrier_bits: usize,
    utilization: f64,
) -> Result<(), StegoError> {
    let capacity = (carrier_bits as f64 * utilization).floor() as usize;
    if bitstream_bits > capacity {
        return Err(StegoError::CapacityExceeded {
            needed: bitstream_bits,
            capacity,
        });
    }
    Ok(())
}

/// Reads a 32-bit big-endian header from the first 32 bits of `bits`.
///
/// Returns `None` if fewer than 32 bits are available.
pub fn read_header<I: Iterator<Item = u8>>(bits: I) -> Option<u32> {
    let mut value = 0u32;
    let mut count = 0;
    for bit in bits.take(HEADER_BITS) {
        value = (value << 1) | u32::from(bit & 1);
        count += 1;
    }
    (count == HEADER_BITS).then_some(value)
}

/// Reassembles bits, most significant first, into bytes.
///
/// A trailing group shorter than 8 bits is dropped.
pub fn assemble<I: Iterator<Item = u8>>(bits: I) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut current = 0u8;
    let mut filled = 0;

    for bit in bits {
        current = (current << 1) | (bit & 1);
        filled += 1;
        if filled == 8 {
            bytes.push(current);
            current = 0;
            filled = 0;
        }
    }

    bytes
}

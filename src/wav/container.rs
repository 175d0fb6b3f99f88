//! RIFF/WAVE container parsing and construction.
//!
//! Only what the engine needs: locating chunks (in particular `"data"`),
//! reading the `"fmt "` chunk, and writing the canonical 44-byte header for
//! 16-bit PCM.

use crate::error::StegoError;

/// Size of the RIFF/WAVE preamble (`"RIFF"`, size, `"WAVE"`).
pub const RIFF_HEADER_SIZE: usize = 12;

/// Size of a chunk header (4-byte id, 4-byte little-endian size).
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Size of the header written by [`build_wav`].
pub const CANONICAL_HEADER_SIZE: usize = 44;

/// WAVE format tag for integer PCM.
pub const FORMAT_PCM: u16 = 1;

/// WAVE format tag for WAVE_FORMAT_EXTENSIBLE.
pub const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Location of a chunk payload inside a WAV buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChunk {
    /// Byte offset of the first payload byte.
    pub offset: usize,
    /// Size declared in the chunk header.
    pub declared_size: u32,
    /// Payload bytes actually present (declared size clamped to the buffer).
    pub len: usize,
}

/// Parsed contents of the `"fmt "` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub format_tag: u16,
    /// Sample encoding: the sub-format of a `WAVE_FORMAT_EXTENSIBLE` header,
    /// otherwise the format tag itself.
    pub sample_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Verifies the 12-byte RIFF/WAVE preamble.
fn check_riff_header(wav: &[u8]) -> Result<(), StegoError> {
    if wav.len() < RIFF_HEADER_SIZE {
        return Err(StegoError::InvalidContainer(format!(
            "buffer is {} bytes, shorter than the RIFF header",
            wav.len()
        )));
    }
    if &wav[0..4] != b"RIFF" || &wav[8..12] != b"WAVE" {
        return Err(StegoError::InvalidContainer(
            "missing RIFF/WAVE signature".to_string(),
        ));
    }
    Ok(())
}

/// Walks the chunk list and returns the first chunk with the given id.
///
/// Chunk payloads are padded to an even size, as RIFF requires.
pub fn locate_chunk(wav: &[u8], id: &[u8; 4]) -> Result<DataChunk, StegoError> {
    check_riff_header(wav)?;

    let mut offset = RIFF_HEADER_SIZE;
    while offset + CHUNK_HEADER_SIZE <= wav.len() {
        let chunk_id = &wav[offset..offset + 4];
        let declared_size = read_u32_le(wav, offset + 4);
        let payload = offset + CHUNK_HEADER_SIZE;

        if chunk_id == id {
            let available = wav.len() - payload;
            return Ok(DataChunk {
                offset: payload,
                declared_size,
                len: (declared_size as usize).min(available),
            });
        }

        let padded = declared_size as usize + (declared_size as usize & 1);
        offset = match payload.checked_add(padded) {
            Some(next) => next,
            None => break,
        };
    }

    Err(StegoError::InvalidContainer(format!(
        "no \"{}\" chunk found",
        String::from_utf8_lossy(id)
    )))
}

/// Locates the `"data"` chunk holding the PCM samples.
pub fn locate_data_chunk(wav: &[u8]) -> Result<DataChunk, StegoError> {
    locate_chunk(wav, b"data")
}

/// Parses the `"fmt "` chunk.
pub fn read_format(wav: &[u8]) -> Result<WavFormat, StegoError> {
    let chunk = locate_chunk(wav, b"fmt ")?;
    if chunk.len < 16 {
        return Err(StegoError::InvalidContainer(format!(
            "\"fmt \" chunk is {} bytes, expected at least 16",
            chunk.len
        )));
    }

    let at = chunk.offset;
    let format_tag = read_u16_le(wav, at);
    // The sub-format GUID starts with the plain format tag.
    let sample_format = if format_tag == FORMAT_EXTENSIBLE && chunk.len >= 40 {
        read_u16_le(wav, at + 24)
    } else {
        format_tag
    };

    Ok(WavFormat {
        format_tag,
        sample_format,
        channels: read_u16_le(wav, at + 2),
        sample_rate: read_u32_le(wav, at + 4),
        byte_rate: read_u32_le(wav, at + 8),
        block_align: read_u16_le(wav, at + 12),
        bits_per_sample: read_u16_le(wav, at + 14),
    })
}

/// Wraps little-endian 16-bit PCM sample bytes in a canonical WAV header.
pub fn build_wav(samples: &[u8], channels: u16, sample_rate: u32) -> Result<Vec<u8>, StegoError> {
    if channels == 0 {
        return Err(StegoError::InvalidContainer(
            "channel count must be positive".to_string(),
        ));
    }

    let data_len = u32::try_from(samples.len())
        .ok()
        .filter(|len| *len <= u32::MAX - 36)
        .ok_or_else(|| {
            StegoError::InvalidContainer(format!(
                "{} sample bytes do not fit in a WAV file",
                samples.len()
            ))
        })?;

    let block_align = channels.checked_mul(2).ok_or_else(|| {
        StegoError::InvalidContainer(format!("{channels} channels overflow block align"))
    })?;
    let byte_rate = sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(|| StegoError::InvalidContainer("byte rate overflows".to_string()))?;

    let mut wav = Vec::with_capacity(CANONICAL_HEADER_SIZE + samples.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(samples);

    Ok(wav)
}

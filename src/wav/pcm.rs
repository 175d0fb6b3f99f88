//! Normalization of decoded audio into canonical 16-bit PCM WAV.
//!
//! Only a fixed, uncompressed 16-bit layout guarantees that flipping a
//! sample byte's LSB changes the amplitude by a negligible amount, and that
//! the data chunk can be addressed byte by byte.

use hound::{SampleFormat, WavReader};
use std::io::Cursor;
use tracing::debug;

use super::container::{build_wav, WavFormat, FORMAT_PCM};
use crate::error::StegoError;

/// Decoded audio: one sample vector per channel, values in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Frames per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }
}

/// Returns `true` for 16-bit integer PCM, the layout the engine writes.
///
/// `WAVE_FORMAT_EXTENSIBLE` headers count when their sub-format is PCM: the
/// sample bytes are laid out the same way.
pub fn is_canonical(format: &WavFormat) -> bool {
    format.sample_format == FORMAT_PCM && format.bits_per_sample == 16
}

/// Quantizes a sample in [-1, 1] to a signed 16-bit integer.
///
/// Positive values scale by 32767 and negative values by 32768, so both
/// extremes are representable. Out-of-range input is clamped; NaN maps to 0.
pub fn quantize(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}

/// Interleaves, quantizes and wraps decoded audio into canonical WAV bytes.
pub fn normalize(channels: &[Vec<f32>], sample_rate: u32) -> Result<Vec<u8>, StegoError> {
    let first = channels.first().ok_or_else(|| {
        StegoError::InvalidContainer("decoded audio has no channels".to_string())
    })?;
    if channels.iter().any(|channel| channel.len() != first.len()) {
        return Err(StegoError::InvalidContainer(
            "decoded channels differ in length".to_string(),
        ));
    }
    let channel_count = u16::try_from(channels.len()).map_err(|_| {
        StegoError::InvalidContainer(format!("{} channels is too many", channels.len()))
    })?;

    let mut samples = Vec::with_capacity(first.len() * channels.len() * 2);
    for frame in 0..first.len() {
        for channel in channels {
            samples.extend_from_slice(&quantize(channel[frame]).to_le_bytes());
        }
    }

    debug!(
        channels = channel_count,
        frames = first.len(),
        sample_rate,
        "normalized audio to 16-bit PCM"
    );

    build_wav(&samples, channel_count, sample_rate)
}

/// Decodes a WAV file (integer PCM up to 32 bits, or 32-bit float) into
/// per-channel samples in [-1, 1].
pub fn decode_wav(bytes: &[u8]) -> Result<DecodedAudio, StegoError> {
    let reader =
        WavReader::new(Cursor::new(bytes)).map_err(|e| StegoError::AudioDecode(e.to_string()))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StegoError::AudioDecode(e.to_string()))?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 / scale))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| StegoError::AudioDecode(e.to_string()))?
        }
    };

    let channel_count = usize::from(spec.channels);
    if channel_count == 0 {
        return Err(StegoError::AudioDecode("zero channels".to_string()));
    }

    let mut channels = vec![Vec::with_capacity(interleaved.len() / channel_count); channel_count];
    for frame in interleaved.chunks_exact(channel_count) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok(DecodedAudio {
        channels,
        sample_rate: spec.sample_rate,
    })
}

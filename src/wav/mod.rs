//! WAV container handling.
//!
//! - [`container`]: RIFF chunk walking and the canonical 44-byte header
//! - [`pcm`]: decoding WAV input and normalizing it to 16-bit PCM

pub mod container;
pub mod pcm;

pub use container::{build_wav, locate_chunk, locate_data_chunk, read_format, DataChunk, WavFormat};
pub use pcm::{decode_wav, is_canonical, normalize, quantize, DecodedAudio};

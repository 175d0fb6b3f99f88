//! # cloakline - Hide encrypted messages in images and audio
//!
//! cloakline encrypts a text message with a password and hides the result in
//! the least significant bits of a carrier: the color bytes of an RGBA image,
//! or the sample bytes of a WAV file.
//!
//! ## Overview
//!
//! - The message is encrypted with **AES-256-GCM** under a key derived from
//!   the password with **PBKDF2-HMAC-SHA256** (100,000 iterations)
//! - Salt and nonce are fresh for every message and travel in the blob
//! - The base64 blob is framed behind a 32-bit big-endian **bit count**
//! - Each framed bit replaces the LSB of one carrier byte
//! - Images skip the alpha channel; audio uses every byte of the `"data"` chunk
//!
//! ## Failure modes
//!
//! - [`StegoError::CapacityExceeded`]: raised before the carrier is modified
//! - [`StegoError::NoHiddenData`]: the length header is not plausible
//! - [`StegoError::AuthenticationFailure`]: wrong password or corrupted blob
//! - [`StegoError::InvalidContainer`]: the audio buffer has no `"data"` chunk
//!
//! ## Example Usage
//!
//! ```rust
//! use cloakline::{decode, encode, ImageCarrier};
//!
//! // A 64x64 RGBA image, e.g. from `ImageCarrier::from_file`
//! let cover = ImageCarrier::from_raw(64, 64, vec![128u8; 64 * 64 * 4]).unwrap();
//!
//! let stego = encode(cover, "RENDEZVOUS AT DAWN", "correct-horse-battery-staple").unwrap();
//!
//! let message = decode(&stego, "correct-horse-battery-staple").unwrap();
//! assert_eq!(message, "RENDEZVOUS AT DAWN");
//!
//! assert!(decode(&stego, "wrong").is_err());
//! ```
//!
//! ## Modules
//!
//! - [`crypto`]: Key derivation and authenticated encryption
//! - [`stego`]: The carrier abstraction, bit framing, image and audio carriers
//! - [`wav`]: WAV container parsing/building and PCM normalization
//! - [`encoder`] / [`decoder`]: The full message pipeline
//! - [`advisory`]: Optional advisory collaborator with static fallbacks
//! - [`config`]: User configuration

pub mod advisory;
pub mod config;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod stego;
pub mod wav;

// Re-export commonly used types at the crate root
pub use config::{Config, ConfigError};
pub use decoder::decode;
pub use encoder::{encode, encode_with_rng};
pub use error::StegoError;
pub use stego::{embed, extract, max_payload_bytes, AudioCarrier, Carrier, ImageCarrier};
pub use wav::DecodedAudio;

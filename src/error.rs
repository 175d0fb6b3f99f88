//! Error type shared by the steganography engine.

use thiserror::Error;

/// Errors that can occur while hiding or revealing a message.
///
/// The first four variants are the domain failures of the engine. The rest
/// come from the file layer that turns image and audio files into carriers.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Carrier too small: need {needed} bits, have capacity for {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// Wrong password, or a truncated/corrupted blob.
    #[error("Access denied: invalid key or integrity failure")]
    AuthenticationFailure,

    #[error("No hidden message detected or carrier corrupted")]
    NoHiddenData,

    #[error("Invalid WAV container: {0}")]
    InvalidContainer(String),

    #[error("Invalid carrier: {0}")]
    InvalidCarrier(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    #[error("Image save error: {0}")]
    ImageSave(String),

    #[error("Audio decode error: {0}")]
    AudioDecode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

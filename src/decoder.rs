//! Message decoding: extract, then decrypt.
//!
//! A missing or corrupt length header is reported as
//! [`StegoError::NoHiddenData`] before any decryption is attempted; anything
//! that goes wrong after that is [`StegoError::AuthenticationFailure`].

use tracing::debug;

use crate::crypto;
use crate::error::StegoError;
use crate::stego::{self, Carrier};

/// Recovers the message hidden in `carrier` using `password`.
pub fn decode<C: Carrier>(carrier: &C, password: &str) -> Result<String, StegoError> {
    let payload = stego::extract(carrier)?;
    debug!(payload_bytes = payload.len(), "decrypting extracted payload");

    let blob = String::from_utf8(payload).map_err(|_| StegoError::AuthenticationFailure)?;
    crypto::decrypt(&blob, password)
}

//! Message encoding: encrypt, frame, embed.

use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::crypto;
use crate::error::StegoError;
use crate::stego::{self, Carrier};

/// Encrypts `message` with `password` and hides the result in `carrier`.
///
/// The carrier is consumed; on success the stego carrier is returned. On
/// failure nothing is returned, so a half-written carrier is never observable.
pub fn encode<C: Carrier>(carrier: C, message: &str, password: &str) -> Result<C, StegoError> {
    let blob = crypto::encrypt(message, password)?;
    embed_blob(carrier, &blob)
}

/// Same as [`encode`], with salt and nonce drawn from `rng`.
pub fn encode_with_rng<C, R>(
    carrier: C,
    message: &str,
    password: &str,
    rng: &mut R,
) -> Result<C, StegoError>
where
    C: Carrier,
    R: RngCore + CryptoRng + ?Sized,
{
    let blob = crypto::encrypt_with_rng(message, password, rng)?;
    embed_blob(carrier, &blob)
}

fn embed_blob<C: Carrier>(carrier: C, blob: &str) -> Result<C, StegoError> {
    debug!(
        blob_chars = blob.len(),
        capacity_bits = carrier.capacity_bits(),
        "embedding cipher blob"
    );
    stego::embed(carrier, blob.as_bytes())
}

//! Password-based authenticated encryption of text messages.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 key derivation with a fresh random salt per message
//! - AES-256-GCM authenticated encryption with a fresh random nonce
//!
//! Blob layout: salt (16 bytes) || nonce (12 bytes) || ciphertext || tag (16 bytes),
//! transported as standard base64 without line breaks.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use super::kdf::{derive_key, SALT_SIZE};
use crate::error::StegoError;

/// Nonce size for AES-GCM (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size for AES-GCM (128 bits).
pub const TAG_SIZE: usize = 16;

/// Bytes in front of the ciphertext: salt followed by nonce.
pub const HEADER_SIZE: usize = SALT_SIZE + NONCE_SIZE;

/// Encrypts a message with a password.
///
/// Salt and nonce are drawn from the operating system CSPRNG, so encrypting
/// the same message twice yields two different blobs.
pub fn encrypt(message: &str, password: &str) -> Result<String, StegoError> {
    encrypt_with_rng(message, password, &mut OsRng)
}

/// Encrypts a message with a password, drawing salt and nonce from `rng`.
pub fn encrypt_with_rng<R>(message: &str, password: &str, rng: &mut R) -> Result<String, StegoError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut salt = [0u8; SALT_SIZE];
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|_| StegoError::AuthenticationFailure)?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), message.as_bytes())
        .map_err(|_| StegoError::AuthenticationFailure)?;

    let mut blob = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    debug!(
        plaintext_bytes = message.len(),
        blob_bytes = blob.len(),
        "encrypted message"
    );

    Ok(BASE64.encode(&blob))
}

/// Decrypts a base64 blob produced by [`encrypt`].
///
/// Every failure (malformed base64, truncated blob, wrong password, tag
/// mismatch) is reported as [`StegoError::AuthenticationFailure`].
pub fn decrypt(blob: &str, password: &str) -> Result<String, StegoError> {
    let bytes = BASE64
        .decode(blob.trim())
        .map_err(|_| StegoError::AuthenticationFailure)?;

    if bytes.len() < HEADER_SIZE {
        return Err(StegoError::AuthenticationFailure);
    }

    let (salt, rest) = bytes.split_at(SALT_SIZE);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

    let salt: &[u8; SALT_SIZE] = salt
        .try_into()
        .map_err(|_| StegoError::AuthenticationFailure)?;
    let key = derive_key(password, salt);
    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|_| StegoError::AuthenticationFailure)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| StegoError::AuthenticationFailure)?;

    String::from_utf8(plaintext).map_err(|_| StegoError::AuthenticationFailure)
}

/// Returns the longest message (in UTF-8 bytes) whose encrypted, base64
/// encoded blob fits in `payload_bytes` bytes.
pub fn max_message_bytes(payload_bytes: usize) -> usize {
    let blob_bytes = (payload_bytes / 4) * 3;
    blob_bytes.saturating_sub(HEADER_SIZE + TAG_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let message = "Hello, cloakline!";
        let password = "my_secret_password";

        let blob = encrypt(message, password).unwrap();
        let decrypted = decrypt(&blob, password).unwrap();

        assert_eq!(decrypted, message);
    }

    #[test]
    fn test_empty_and_multibyte_messages() {
        for message in ["", "naïve café — 東京 🚀"] {
            let blob = encrypt(message, "pw").unwrap();
            assert_eq!(decrypt(&blob, "pw").unwrap(), message);
        }
    }

    #[test]
    fn test_wrong_password_fails() {
        let blob = encrypt("Secret data", "correct").unwrap();
        let result = decrypt(&blob, "wrong");

        assert!(matches!(result, Err(StegoError::AuthenticationFailure)));
    }

    #[test]
    fn test_blob_layout() {
        let message = "layout";
        let blob = encrypt(message, "pw").unwrap();
        let bytes = BASE64.decode(&blob).unwrap();

        assert_eq!(bytes.len(), HEADER_SIZE + message.len() + TAG_SIZE);
        assert!(!blob.contains('\n'));
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_call() {
        let blob1 = encrypt("same", "same").unwrap();
        let blob2 = encrypt("same", "same").unwrap();

        assert_ne!(blob1, blob2);
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let blob1 = encrypt_with_rng("fixed", "pw", &mut StdRng::seed_from_u64(42)).unwrap();
        let blob2 = encrypt_with_rng("fixed", "pw", &mut StdRng::seed_from_u64(42)).unwrap();
        let blob3 = encrypt_with_rng("fixed", "pw", &mut StdRng::seed_from_u64(43)).unwrap();

        assert_eq!(blob1, blob2);
        assert_ne!(blob1, blob3);
        assert_eq!(decrypt(&blob1, "pw").unwrap(), "fixed");
    }

    #[test]
    fn test_tampered_ciphertext_and_tag_fail() {
        let blob = encrypt_with_rng("tamper me", "pw", &mut StdRng::seed_from_u64(7)).unwrap();
        let bytes = BASE64.decode(&blob).unwrap();

        // First ciphertext byte, last ciphertext byte, first and last tag byte.
        let tag_start = bytes.len() - TAG_SIZE;
        for (index, bit) in [(HEADER_SIZE, 0), (tag_start - 1, 7), (tag_start, 3), (bytes.len() - 1, 5)] {
            let mut corrupted = bytes.clone();
            corrupted[index] ^= 1 << bit;
            let result = decrypt(&BASE64.encode(&corrupted), "pw");
            assert!(
                matches!(result, Err(StegoError::AuthenticationFailure)),
                "flip at byte {index} bit {bit} was accepted"
            );
        }
    }

    #[test]
    fn test_truncated_and_garbage_blobs_fail() {
        let blob = encrypt("truncate", "pw").unwrap();
        let bytes = BASE64.decode(&blob).unwrap();

        for input in [
            String::new(),
            "not base64 at all!".to_string(),
            BASE64.encode(&bytes[..10]),
            BASE64.encode(&bytes[..HEADER_SIZE]),
            BASE64.encode(&bytes[..bytes.len() - 1]),
        ] {
            assert!(matches!(
                decrypt(&input, "pw"),
                Err(StegoError::AuthenticationFailure)
            ));
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let blob = encrypt("padded", "pw").unwrap();
        let padded = format!("  {blob}\n");

        assert_eq!(decrypt(&padded, "pw").unwrap(), "padded");
    }

    #[test]
    fn test_max_message_bytes() {
        // 84 base64 chars hold 63 blob bytes; 63 - 28 - 16 = 19.
        assert_eq!(max_message_bytes(84), 19);
        assert_eq!(max_message_bytes(10), 0);

        let message = "x".repeat(max_message_bytes(200));
        assert!(encrypt(&message, "pw").unwrap().len() <= 200);
        let message = "x".repeat(max_message_bytes(200) + 1);
        assert!(encrypt(&message, "pw").unwrap().len() > 200);
    }
}

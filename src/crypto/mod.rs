//! Cryptographic operations for cloakline.
//!
//! This module provides:
//! - Password-based key derivation (PBKDF2-HMAC-SHA256)
//! - Authenticated encryption of messages (AES-256-GCM)

pub mod aead;
pub mod kdf;

pub use aead::{decrypt, encrypt, encrypt_with_rng, max_message_bytes, NONCE_SIZE, TAG_SIZE};
pub use kdf::{derive_key, ITERATIONS, KEY_SIZE, SALT_SIZE};

//! Password-based key derivation.
//!
//! PBKDF2-HMAC-SHA256 with a fixed iteration count. The salt travels inside
//! the cipher blob, so the password alone is enough to re-derive the key.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

/// PBKDF2 iteration count. Fixed: blobs carry no parameters.
pub const ITERATIONS: u32 = 100_000;

/// Salt size in bytes.
pub const SALT_SIZE: usize = 16;

/// Derived key size in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// Derives a 256-bit key from a password and salt.
///
/// Deterministic: the same `(password, salt)` pair always yields the same key.
/// The returned buffer is wiped when dropped.
pub fn derive_key(password: &str, salt: &[u8; SALT_SIZE]) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut *key);
    key
}

//! Argon2id password hashing with `<hex digest>.<hex salt>` storage encoding.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use argon2::{Algorithm, Argon2, Params, Version};
use subtle::ConstantTimeEq;

use classhub_core::error::AppError;

/// Salt length in bytes for newly hashed passwords.
const SALT_LEN: usize = 16;
/// Derived digest length in bytes.
const DIGEST_LEN: usize = 64;
/// Argon2id memory cost in KiB.
const MEMORY_COST_KIB: u32 = 19_456;
/// Argon2id iteration count.
const ITERATIONS: u32 = 2;
/// Argon2id lane count.
const PARALLELISM: u32 = 1;

/// Handles password hashing and verification.
///
/// Stored form is `hex(digest) + "." + hex(salt)`, lowercase. Every
/// credential gets a fresh random salt, so identical passwords hash to
/// different stored forms, and verification re-derives the digest with the
/// same fixed parameters before comparing in constant time.
#[derive(Clone, Default)]
pub struct PasswordHasher;

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish()
    }
}

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password on the current thread.
    ///
    /// Deliberately expensive; use [`PasswordHasher::hash`] from async
    /// contexts so the runtime keeps serving other requests.
    pub fn hash_blocking(&self, password: &str) -> Result<String, AppError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);

        let mut digest = [0u8; DIGEST_LEN];
        kdf()?
            .hash_password_into(password.as_bytes(), &salt, &mut digest)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(format!("{}.{}", hex::encode(digest), hex::encode(salt)))
    }

    /// Verifies a plaintext password against a stored form on the current
    /// thread.
    ///
    /// Returns `false` on any malformed stored form; verification never
    /// errors. Digest comparison is constant-time so a mismatch leaks
    /// nothing about how many leading bytes matched.
    pub fn verify_blocking(&self, password: &str, stored: &str) -> bool {
        let Some((digest_hex, salt_hex)) = stored.split_once('.') else {
            return false;
        };
        let Ok(expected) = hex::decode(digest_hex) else {
            return false;
        };
        let Ok(salt) = hex::decode(salt_hex) else {
            return false;
        };
        if expected.len() != DIGEST_LEN {
            return false;
        }

        let Ok(kdf) = kdf() else {
            return false;
        };
        let mut derived = [0u8; DIGEST_LEN];
        if kdf
            .hash_password_into(password.as_bytes(), &salt, &mut derived)
            .is_err()
        {
            return false;
        }

        derived.ct_eq(expected.as_slice()).into()
    }

    /// Hashes a password on the blocking thread pool.
    pub async fn hash(&self, password: &str) -> Result<String, AppError> {
        let hasher = self.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    }

    /// Verifies a password on the blocking thread pool.
    pub async fn verify(&self, password: &str, stored: &str) -> Result<bool, AppError> {
        let hasher = self.clone();
        let password = password.to_owned();
        let stored = stored.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &stored))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))
    }
}

/// Builds the key-derivation function with the fixed credential parameters.
fn kdf() -> Result<Argon2<'static>, AppError> {
    let params = Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, Some(DIGEST_LEN))
        .map_err(|e| AppError::internal(format!("Invalid KDF parameters: {e}")))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

//! Salted Argon2id credential hashing with constant-time verification.
//!
//! Stored form is `saltHex:derivedKeyHex`, where the salt is 32 random
//! bytes and the derived key is 64 bytes. The hex-encoded salt string is
//! what feeds the KDF, so a stored credential is self-describing.

use argon2::password_hash::Output;
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use rand::rngs::OsRng;

use warden_core::config::AuthConfig;
use warden_core::error::AppError;

/// Random salt length in bytes, before hex encoding.
pub const SALT_LEN: usize = 32;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 64;

/// One-way password hashing and verification.
///
/// The KDF is CPU and memory hard; the async entry points run it on the
/// blocking pool so request tasks are not stalled.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    params: Params,
}

impl CredentialStore {
    /// Builds a store with the KDF cost parameters from `config`.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.kdf_memory_kib,
            config.kdf_iterations,
            config.kdf_parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| AppError::configuration(format!("Invalid KDF parameters: {e}")))?;
        Ok(Self { params })
    }

    /// Hashes `plaintext` with a fresh salt.
    pub async fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        let store = self.clone();
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || store.hash_blocking(&plaintext))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
    }

    /// Checks `plaintext` against a stored credential.
    pub async fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, AppError> {
        let store = self.clone();
        let plaintext = plaintext.to_owned();
        let stored = stored.to_owned();
        tokio::task::spawn_blocking(move || store.verify_blocking(&plaintext, &stored))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
    }

    /// Synchronous form of [`hash`](Self::hash).
    pub fn hash_blocking(&self, plaintext: &str) -> Result<String, AppError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| AppError::internal(format!("Entropy source failure: {e}")))?;
        let salt = hex::encode(salt);

        let key = self.derive(plaintext, &salt)?;
        Ok(format!("{salt}:{}", hex::encode(key)))
    }

    /// Synchronous form of [`verify`](Self::verify).
    ///
    /// A malformed stored form or a key of the wrong length is a failed
    /// verification, not an error.
    pub fn verify_blocking(&self, plaintext: &str, stored: &str) -> Result<bool, AppError> {
        let Some((salt, key_hex)) = stored.split_once(':') else {
            return Ok(false);
        };
        let Ok(expected) = hex::decode(key_hex) else {
            return Ok(false);
        };
        if salt.len() < argon2::MIN_SALT_LEN || expected.len() != KEY_LEN {
            return Ok(false);
        }

        let derived = self.derive(plaintext, salt)?;

        // Output's equality is constant-time.
        match (Output::new(&derived), Output::new(&expected)) {
            (Ok(derived), Ok(expected)) => Ok(derived == expected),
            _ => Ok(false),
        }
    }

    fn derive(&self, plaintext: &str, salt: &str) -> Result<[u8; KEY_LEN], AppError> {
        let kdf = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());
        let mut key = [0u8; KEY_LEN];
        kdf.hash_password_into(plaintext.as_bytes(), salt.as_bytes(), &mut key)
            .map_err(|e| AppError::internal(format!("Key derivation failed: {e}")))?;
        Ok(key)
    }
}

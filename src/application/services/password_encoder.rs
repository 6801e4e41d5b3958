//! Password hashing and verification.
//!
//! New hashes are Argon2id PHC strings with a per-user random salt. Accounts
//! created before the switch still hold a legacy digest,
//! `hex(md5(password + legacy_salt))`, which is recognised by its shape and
//! replaced with an Argon2 hash after the next successful login.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::AppError;

const DUMMY_PASSWORD: &str = "user-center-dummy-password";

#[derive(Debug, Clone)]
pub struct PasswordEncoder {
    legacy_salt: Arc<str>,
    /// Hash compared against when there is no stored hash to check.
    dummy_hash: Arc<OnceCell<String>>,
}

impl PasswordEncoder {
    pub fn new(legacy_salt: impl Into<Arc<str>>) -> Self {
        Self {
            legacy_salt: legacy_salt.into(),
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Hashes `raw` with Argon2id on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if hashing fails or the task panics.
    pub async fn hash(&self, raw: &str) -> Result<String, AppError> {
        let raw = raw.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(OsRng);
            Argon2::default()
                .hash_password(raw.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
    }

    /// Checks `raw` against an Argon2 PHC string.
    ///
    /// An unparseable stored hash never matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the verification task panics.
    pub async fn verify(&self, raw: &str, stored: &str) -> Result<bool, AppError> {
        let raw = raw.to_owned();
        let stored = stored.to_owned();
        tokio::task::spawn_blocking(move || match PasswordHash::new(&stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                false
            }
        })
        .await
        .map_err(|e| AppError::internal(format!("password verification task failed: {e}")))
    }

    /// Runs a full verification that always fails, so a login for an
    /// unknown account costs as much as one with a wrong password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the dummy hash cannot be built or
    /// the verification task panics.
    pub async fn verify_dummy(&self, raw: &str) -> Result<bool, AppError> {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hash(DUMMY_PASSWORD))
            .await?;
        self.verify(raw, dummy).await?;
        Ok(false)
    }

    #[cfg(test)]
    pub(crate) fn dummy_hash_built(&self) -> bool {
        self.dummy_hash.initialized()
    }

    /// Legacy salted MD5 digest, lowercase hex.
    pub fn legacy_digest(&self, raw: &str) -> String {
        let mut input = String::with_capacity(raw.len() + self.legacy_salt.len());
        input.push_str(raw);
        input.push_str(&self.legacy_salt);
        hex::encode(md5::compute(input.as_bytes()).0)
    }

    /// True for stored values shaped like a legacy digest (32 hex characters).
    pub fn is_legacy(stored: &str) -> bool {
        stored.len() == 32 && stored.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> PasswordEncoder {
        PasswordEncoder::new("yumi123")
    }

    #[tokio::test]
    async fn hash_then_verify() {
        let encoder = encoder();
        let hash = encoder.hash("password1").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(encoder.verify("password1", &hash).await.unwrap());
        assert!(!encoder.verify("password2", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_gets_distinct_salts() {
        let encoder = encoder();
        let first = encoder.hash("password1").await.unwrap();
        let second = encoder.hash("password1").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_never_matches() {
        assert!(!encoder().verify("password1", "not-a-hash").await.unwrap());
    }

    #[tokio::test]
    async fn dummy_verification_never_matches() {
        let encoder = encoder();

        assert!(!encoder.verify_dummy("password1").await.unwrap());
        assert!(!encoder.verify_dummy(DUMMY_PASSWORD).await.unwrap());
    }

    #[tokio::test]
    async fn dummy_hash_is_built_once_and_shared_by_clones() {
        let encoder = encoder();
        let clone = encoder.clone();

        encoder.verify_dummy("password1").await.unwrap();
        let first = encoder.dummy_hash.get().cloned().unwrap();
        clone.verify_dummy("password2").await.unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_eq!(clone.dummy_hash.get(), Some(&first));
    }

    #[test]
    fn legacy_digest_matches_known_values() {
        let encoder = encoder();
        assert_eq!(
            encoder.legacy_digest("password1"),
            "6e9f0fa70212f60b2b97e154f06d1e19"
        );
        assert_eq!(
            encoder.legacy_digest("12345678"),
            "d2ec7cc17e17006abf81f74a1f9745aa"
        );
    }

    #[test]
    fn legacy_shape_detection() {
        assert!(PasswordEncoder::is_legacy("6e9f0fa70212f60b2b97e154f06d1e19"));
        assert!(!PasswordEncoder::is_legacy("$argon2id$v=19$m=19456,t=2,p=1$abc$def"));
        assert!(!PasswordEncoder::is_legacy("6e9f0fa70212f60b2b97e154f06d1e1"));
        assert!(!PasswordEncoder::is_legacy("zz9f0fa70212f60b2b97e154f06d1e19"));
    }
}

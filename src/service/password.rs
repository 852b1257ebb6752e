use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::CafeteriaError;

/// How credentials are written at registration and checked at login.
///
/// `Plaintext` keeps the password verbatim, which lets existing `usuarios` rows
/// (SERIAL or BIGSERIAL keyed) keep working. Prefer `Argon2` for new deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Plaintext,
    Argon2,
}

impl PasswordScheme {
    /// Encode a password for storage.
    pub fn encode(&self, password: &str) -> Result<String, CafeteriaError> {
        match self {
            PasswordScheme::Plaintext => Ok(password.to_string()),
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| CafeteriaError::PasswordHash(e.to_string()))
            }
        }
    }

    /// Check a candidate password against the stored value.
    pub fn verify(&self, candidate: &str, stored: &str) -> bool {
        match self {
            PasswordScheme::Plaintext => bool::from(candidate.as_bytes().ct_eq(stored.as_bytes())),
            PasswordScheme::Argon2 => {
                let Ok(parsed) = PasswordHash::new(stored) else {
                    return false;
                };
                Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_is_exact_match() {
        let scheme = PasswordScheme::Plaintext;
        let stored = scheme.encode("s3creto").unwrap();
        assert_eq!(stored, "s3creto");
        assert!(scheme.verify("s3creto", &stored));
        assert!(!scheme.verify("S3creto", &stored));
        assert!(!scheme.verify("s3cret", &stored));
    }

    #[test]
    fn argon2_never_stores_the_password() {
        let scheme = PasswordScheme::Argon2;
        let stored = scheme.encode("s3creto").unwrap();
        assert_ne!(stored, "s3creto");
        assert!(stored.starts_with("$argon2id$"));
        assert!(scheme.verify("s3creto", &stored));
        assert!(!scheme.verify("otra", &stored));
    }

    #[test]
    fn argon2_rejects_legacy_plaintext_rows() {
        assert!(!PasswordScheme::Argon2.verify("s3creto", "s3creto"));
    }
}

//! Password hashing utilities
//!
//! Argon2id for hashing and verification, with a legacy accommodation for
//! seed-data passwords stored in plain text.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use subtle::ConstantTimeEq;

#[derive(Debug)]
pub enum PasswordError {
    HashError(String),
    VerifyError(String),
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HashError(msg) => write!(f, "Password hash error: {}", msg),
            Self::VerifyError(msg) => write!(f, "Password verify error: {}", msg),
        }
    }
}

impl std::error::Error for PasswordError {}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PasswordError::VerifyError(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Detect whether a stored value is an Argon2 hash
pub fn is_argon2_hash(s: &str) -> bool {
    s.starts_with("$argon2")
}

/// Verify against a stored password that may be a hash or legacy plaintext
///
/// Seed data from before password hashing was introduced stores plain text;
/// the plaintext branch uses a constant-time comparison.
pub fn verify_stored_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    if is_argon2_hash(stored) {
        verify_password(password, stored)
    } else {
        Ok(password.as_bytes().ct_eq(stored.as_bytes()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "test_password_123";
        let hash = hash_password(password).expect("hash should succeed");

        assert!(is_argon2_hash(&hash));
        assert!(verify_password(password, &hash).expect("verify should succeed"));
        assert!(!verify_password("wrong_password", &hash).expect("verify should succeed"));
    }

    #[test]
    fn test_is_argon2_hash() {
        assert!(is_argon2_hash("$argon2id$v=19$m=19456,t=2,p=1$xxx"));
        assert!(is_argon2_hash("$argon2i$v=19$m=19456,t=2,p=1$xxx"));
        assert!(!is_argon2_hash("plaintext_password"));
        assert!(!is_argon2_hash("$2b$10$bcrypt_style"));
    }

    #[test]
    fn test_verify_stored_plaintext() {
        assert!(verify_stored_password("admin", "admin").unwrap());
        assert!(!verify_stored_password("wrong", "admin").unwrap());
    }

    #[test]
    fn test_verify_stored_hashed() {
        let hash = hash_password("admin").unwrap();
        assert!(verify_stored_password("admin", &hash).unwrap());
        assert!(!verify_stored_password("wrong", &hash).unwrap());
    }
}

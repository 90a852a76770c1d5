//! Credential verification.
//!
//! Submitted passwords are checked against a stored salted one-way hash;
//! plaintext comparison is not an option this module offers.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("could not hash password")]
    Hash,
}

/// Turns a password into a stored hash and checks submissions against one.
pub trait CredentialVerifier: Send + Sync {
    /// Hash a password for storage (PHC string, per-user salt).
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Whether `password` matches `stored_hash`.
    ///
    /// An unparseable stored hash counts as a mismatch, never a panic.
    fn verify(&self, password: &str, stored_hash: &str) -> bool;
}

/// Argon2id implementation with default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| CredentialError::Hash)
    }

    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let verifier = Argon2Verifier;
        let hash = verifier.hash("demo123").unwrap();

        assert!(verifier.verify("demo123", &hash));
        assert!(!verifier.verify("wrong", &hash));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let verifier = Argon2Verifier;
        let a = verifier.hash("demo123").unwrap();
        let b = verifier.hash("demo123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_is_a_mismatch() {
        let verifier = Argon2Verifier;
        assert!(!verifier.verify("demo123", "not-a-phc-string"));
    }
}

//! Password Hashing and Verification
//!
//! Argon2id hashes in PHC string format, with:
//! - Zeroization of submitted plaintext
//! - Constant-time comparison (internal to Argon2)
//! - A three-way verification result: match, mismatch, or structural fault
//!
//! The fault case is kept separate from a plain mismatch because callers
//! map the two to different HTTP outcomes.

use std::fmt;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier as _,
    password_hash::{self, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("invalid password hash format")]
    InvalidHashFormat,

    /// Verification failed for a reason other than a wrong password
    #[error("password verification failed: {0}")]
    VerificationFailed(String),
}

/// Submitted plaintext password with automatic memory zeroization
///
/// Does not implement `Clone`; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SubmittedPassword(String);

impl SubmittedPassword {
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SubmittedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubmittedPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// Stored password verifier in PHC string format
///
/// Construction validates the string eagerly, so a malformed verifier is a
/// startup-time error rather than a surprise at first login.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordVerifier {
    hash: String,
}

impl PasswordVerifier {
    /// Create from a PHC string (e.g., from configuration)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a submitted password against this verifier.
    ///
    /// `Ok(true)` on a match, `Ok(false)` on a wrong password, `Err` when
    /// the comparison itself fails (e.g., the stored hash turned out to be
    /// unusable). Argon2 compares digests in constant time internally.
    pub fn verify(&self, password: &SubmittedPassword) -> Result<bool, PasswordHashError> {
        let parsed_hash =
            PasswordHash::new(&self.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordHashError::VerificationFailed(e.to_string())),
        }
    }
}

impl fmt::Debug for PasswordVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordVerifier")
            .field("hash", &"[HASH]")
            .finish()
    }
}

/// Hash a plaintext password into a PHC-formatted verifier.
///
/// Used for provisioning credentials and in tests; request handling only
/// ever verifies.
pub fn hash_password(password: &SubmittedPassword) -> Result<PasswordVerifier, PasswordHashError> {
    let salt = SaltString::generate(OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    Ok(PasswordVerifier {
        hash: hash.to_string(),
    })
}

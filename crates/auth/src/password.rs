//! Password hashing and verification utilities using Argon2id.
//!
//! Stored hashes use the PHC string format, so parameters travel with the
//! hash and can be tuned without invalidating existing credentials.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,
}

/// Hashes a password using Argon2id with a fresh random salt.
///
/// # Arguments
///
/// * `password` - The password to hash
///
/// # Returns
///
/// The PHC-formatted hash string wrapped in a `SecretString`.
pub fn hash_password(password: &SecretString) -> Result<SecretString, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(SecretString::from(hash.to_string()))
}

/// Verifies a password against a stored PHC-formatted hash.
///
/// # Errors
///
/// Returns `InvalidHashFormat` when the stored hash cannot be parsed and
/// `VerificationFailed` when the password does not match.
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(expected_hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// Checks if a password is strong enough.
///
/// # Returns
///
/// `Ok(())` or the list of failed rules.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<PasswordValidationError>> {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push(PasswordValidationError::TooShort);
    }

    if password.len() > 256 {
        errors.push(PasswordValidationError::TooLong);
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        errors.push(PasswordValidationError::MissingUppercase);
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        errors.push(PasswordValidationError::MissingLowercase);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(PasswordValidationError::MissingDigit);
    }

    if errors.is_empty() {
        Ok(())
    }
    else {
        Err(errors)
    }
}

/// Errors for password validation.
#[derive(Debug, Error)]
pub enum PasswordValidationError {
    #[error("Password must be at least 8 characters long")]
    TooShort,

    #[error("Password must be at most 256 characters long")]
    TooLong,

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = SecretString::from("TestPassword123".to_string());
        let hash = hash_password(&password).unwrap();
        let result = verify_password(&password, hash.expose_secret());
        assert!(result.is_ok(), "Verification failed: {:?}", result);
    }

    #[test]
    fn test_wrong_password_fails() {
        let password = SecretString::from("CorrectPassword1".to_string());
        let wrong = SecretString::from("WrongPassword1".to_string());
        let hash = hash_password(&password).unwrap();
        assert!(verify_password(&wrong, hash.expose_secret()).is_err());
    }

    #[test]
    fn test_garbage_hash_rejected() {
        let password = SecretString::from("anything".to_string());
        assert!(matches!(
            verify_password(&password, "not-a-phc-string"),
            Err(PasswordError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = SecretString::from("TestPassword123".to_string());
        let a = hash_password(&password).unwrap();
        let b = hash_password(&password).unwrap();
        assert_ne!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password_strength("abc").is_err());
        assert!(validate_password_strength("nodigitshere").is_err());
        assert!(validate_password_strength("Str0ngEnough").is_ok());
    }
}

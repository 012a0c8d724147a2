//! Password hashing

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jobly_core::{JoblyError, JoblyResult};

/// Hash a plaintext password into a PHC string
pub fn hash_password(plaintext: &str) -> JoblyResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| JoblyError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed stored hash never verifies.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// Password Hashing and Verification
///
/// Opaque password capability backed by bcrypt, consumed by the login
/// route. Policy around password content lives with the caller.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppError;

/// Hash a plaintext password.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a plaintext password against its stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}

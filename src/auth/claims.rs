/// Session Token Claims
///
/// The payload carried inside every issued session token.

use serde::{Deserialize, Serialize};

/// Fixed session lifetime, in seconds.
pub const SESSION_LIFETIME_SECS: i64 = 30 * 60;

/// Claims for one issued session.
///
/// Constructed only at issuance, or decoded from a token whose signature
/// has already been verified. Never built from unchecked client input.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: principal id of the authenticated user
    pub sub: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create claims for a freshly authenticated principal, expiring a
    /// fixed session lifetime from now.
    pub fn new(principal_id: i64, issuer: String) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: principal_id,
            exp: now + SESSION_LIFETIME_SECS,
            iat: now,
            iss: issuer,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.exp <= chrono::Utc::now().timestamp()
    }
}

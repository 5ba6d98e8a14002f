/// Credential lookup seam.
///
/// User persistence lives outside this service; the login route only
/// needs a read-only lookup from email to a stored credential. Real
/// deployments plug their user store in behind this trait.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AppError;

/// A stored credential for one principal.
#[derive(Debug, Clone)]
pub struct Credential {
    pub principal_id: i64,
    pub password_hash: String,
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up the credential registered under an email address.
    ///
    /// An unknown email is `Ok(None)`, not an error.
    async fn lookup(&self, email: &str) -> Result<Option<Credential>, AppError>;
}

/// In-memory credential store, seeded at construction.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: HashMap<String, Credential>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, email: &str, principal_id: i64, password_hash: String) -> Self {
        self.users.insert(
            email.to_string(),
            Credential {
                principal_id,
                password_hash,
            },
        );
        self
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn lookup(&self, email: &str) -> Result<Option<Credential>, AppError> {
        Ok(self.users.get(email).cloned())
    }
}

/// In-memory revocation ledger for tests and single-process deployments.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::RevocationLedger;
use crate::error::LedgerError;

#[derive(Default)]
pub struct InMemoryLedger {
    entries: Mutex<HashMap<String, Instant>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationLedger for InMemoryLedger {
    async fn is_revoked(&self, token: &str) -> Result<bool, LedgerError> {
        let mut entries = self.entries.lock().await;

        match entries.get(token) {
            Some(deadline) if *deadline > Instant::now() => Ok(true),
            Some(_) => {
                // An expired entry behaves exactly like a missing key.
                entries.remove(token);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), LedgerError> {
        self.entries
            .lock()
            .await
            .insert(token.to_string(), Instant::now() + ttl);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_token_is_not_revoked() {
        let ledger = InMemoryLedger::new();

        assert!(!ledger.is_revoked("unknown").await.unwrap());
    }

    #[tokio::test]
    async fn revoked_token_is_reported_revoked() {
        let ledger = InMemoryLedger::new();

        ledger
            .revoke("some-token", Duration::from_secs(60))
            .await
            .unwrap();

        assert!(ledger.is_revoked("some-token").await.unwrap());
    }

    #[tokio::test]
    async fn entries_expire_with_their_ttl() {
        let ledger = InMemoryLedger::new();

        ledger
            .revoke("some-token", Duration::from_secs(0))
            .await
            .unwrap();

        assert!(!ledger.is_revoked("some-token").await.unwrap());
    }
}

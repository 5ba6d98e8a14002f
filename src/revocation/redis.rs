/// Redis-backed revocation ledger.
///
/// Keys are the literal token string under a fixed namespace; the value
/// is a sentinel and expiry is delegated to Redis TTLs.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};

use super::RevocationLedger;
use crate::configuration::RevocationSettings;
use crate::error::LedgerError;

const KEY_PREFIX: &str = "authgate:revoked:";
const REVOKED_SENTINEL: &str = "true";

#[derive(Clone)]
pub struct RedisLedger {
    connection: MultiplexedConnection,
}

impl RedisLedger {
    /// Connect to the backend and verify it is responsive.
    pub async fn connect(settings: &RevocationSettings) -> Result<Self, LedgerError> {
        let client = Client::open(settings.connection_string())
            .map_err(|e| LedgerError::Backend(format!("Failed to create Redis client: {}", e)))?;

        let mut connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| LedgerError::Backend(format!("Failed to connect to Redis: {}", e)))?;

        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(|e| LedgerError::Backend(format!("Redis ping failed: {}", e)))?;

        tracing::debug!("Revocation ledger connection established");

        Ok(Self { connection })
    }

    fn key(token: &str) -> String {
        format!("{}{}", KEY_PREFIX, token)
    }
}

#[async_trait]
impl RevocationLedger for RedisLedger {
    async fn is_revoked(&self, token: &str) -> Result<bool, LedgerError> {
        let mut connection = self.connection.clone();

        // A missing key decodes as None: not revoked. Only a transport or
        // server failure propagates as an error.
        let value: Option<String> = connection
            .get(Self::key(token))
            .await
            .map_err(|e| LedgerError::Backend(e.to_string()))?;

        Ok(value.as_deref() == Some(REVOKED_SENTINEL))
    }

    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), LedgerError> {
        let mut connection = self.connection.clone();

        let _: () = connection
            .set_ex(Self::key(token), REVOKED_SENTINEL, ttl.as_secs())
            .await
            .map_err(|e| LedgerError::Backend(e.to_string()))?;

        Ok(())
    }
}

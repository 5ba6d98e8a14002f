/// Revocation Ledger
///
/// Records tokens invalidated before their natural expiry. The ledger is
/// an external shared store behind a trait so the request gate can be
/// exercised against an in-memory implementation.

use std::time::Duration;

use async_trait::async_trait;

use crate::auth::SESSION_LIFETIME_SECS;
use crate::error::LedgerError;

mod memory;
mod redis;

pub use memory::InMemoryLedger;
pub use self::redis::RedisLedger;

/// Time-to-live for revocation entries. A fixed upper bound on the
/// remaining validity of any live token, so entries never need to outlast
/// the session lifetime.
pub const REVOCATION_TTL: Duration = Duration::from_secs(SESSION_LIFETIME_SECS as u64);

/// External key/expiry store recording revoked tokens.
///
/// Implementations must treat a missing key as "not revoked"; only a
/// backing-store failure is an error.
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Whether the exact token string has been revoked.
    async fn is_revoked(&self, token: &str) -> Result<bool, LedgerError>;

    /// Record the token as revoked for the given time-to-live.
    async fn revoke(&self, token: &str, ttl: Duration) -> Result<(), LedgerError>;
}

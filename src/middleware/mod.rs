/// Middleware module
///
/// The authentication gate protecting routes that require a valid
/// session token.

mod auth_gate;

pub use auth_gate::extract_bearer_token;
pub use auth_gate::AuthGate;

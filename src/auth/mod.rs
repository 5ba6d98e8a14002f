/// Authentication module
///
/// Session token claims, signing/verification, and the password
/// capability used at login.

mod claims;
mod password;
mod token;

pub use claims::Claims;
pub use claims::SESSION_LIFETIME_SECS;
pub use password::hash_password;
pub use password::verify_password;
pub use token::issue_token;
pub use token::verify_token;

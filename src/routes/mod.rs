mod auth;
mod health_check;

pub use auth::current_principal;
pub use auth::login;
pub use auth::logout;
pub use health_check::health_check;

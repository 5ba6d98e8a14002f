use crate::error::{AppError, ConfigError};

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub revocation: RevocationSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

/// Token signing settings. Immutable after startup; cloned freely into
/// the signer, verifier and request gate.
#[derive(serde::Deserialize, Clone)]
pub struct AuthSettings {
    pub secret: String,
    pub issuer: String,
}

impl AuthSettings {
    /// The signing secret, or a configuration error when none is set.
    ///
    /// An absent secret is a fatal deployment defect: every signing and
    /// verification attempt will fail identically until it is fixed.
    pub fn signing_secret(&self) -> Result<&str, AppError> {
        if self.secret.is_empty() {
            return Err(AppError::Config(ConfigError::MissingRequired(
                "auth.secret".to_string(),
            )));
        }
        Ok(&self.secret)
    }
}

/// Connection settings for the revocation ledger backend.
#[derive(serde::Deserialize, Clone)]
pub struct RevocationSettings {
    pub host: String,
    pub port: u16,
}

impl RevocationSettings {
    pub fn connection_string(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?;
    settings.try_deserialize::<Settings>()
}

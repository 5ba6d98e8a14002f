use std::net::TcpListener;
use std::sync::Arc;

use authgate::configuration::get_configuration;
use authgate::credentials::{CredentialStore, InMemoryCredentialStore};
use authgate::revocation::{RedisLedger, RevocationLedger};
use authgate::startup::run;
use authgate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    tracing::info!("Starting application");

    let configuration = match get_configuration() {
        Ok(config) => {
            tracing::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    let ledger: Arc<dyn RevocationLedger> =
        match RedisLedger::connect(&configuration.revocation).await {
            Ok(ledger) => {
                tracing::info!("Revocation ledger connected");
                Arc::new(ledger)
            }
            Err(e) => {
                tracing::error!("Failed to connect to revocation ledger: {}", e);
                return Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "Revocation ledger connection error",
                ));
            }
        };

    // Deployments wire their user persistence in here; the binary ships
    // with an empty in-memory store.
    let credentials: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on {}", address);

    let server = run(listener, configuration.auth, ledger, credentials)?;

    server.await
}

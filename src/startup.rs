use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};

use crate::configuration::AuthSettings;
use crate::credentials::CredentialStore;
use crate::logger::RequestLogger;
use crate::middleware::AuthGate;
use crate::revocation::RevocationLedger;
use crate::routes::{current_principal, health_check, login, logout};

pub fn run(
    listener: TcpListener,
    settings: AuthSettings,
    ledger: Arc<dyn RevocationLedger>,
    credentials: Arc<dyn CredentialStore>,
) -> Result<Server, std::io::Error> {
    let settings_data = web::Data::new(settings.clone());
    let ledger_data = web::Data::new(ledger.clone());
    let credentials_data = web::Data::new(credentials);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestLogger)
            // Shared state
            .app_data(settings_data.clone())
            .app_data(ledger_data.clone())
            .app_data(credentials_data.clone())
            // Public routes
            .route("/health_check", web::get().to(health_check))
            .route("/auth/login", web::post().to(login))
            // Protected routes (require a valid, unrevoked session token)
            .service(
                web::scope("/auth")
                    .wrap(AuthGate::new(settings.clone(), ledger.clone()))
                    .route("/logout", web::delete().to(logout))
                    .route("/me", web::get().to(current_principal)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

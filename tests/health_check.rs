use std::net::TcpListener;
use std::sync::Arc;

use authgate::configuration::AuthSettings;
use authgate::credentials::InMemoryCredentialStore;
use authgate::revocation::InMemoryLedger;
use authgate::startup::run;

fn spawn_app() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let settings = AuthSettings {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        issuer: "test".to_string(),
    };
    let server = run(
        listener,
        settings,
        Arc::new(InMemoryLedger::new()),
        Arc::new(InMemoryCredentialStore::new()),
    )
    .expect("Failed to bind address");

    let _ = tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn health_check_works() {
    let address = spawn_app();

    let response = reqwest::Client::new()
        .get(&format!("{}/health_check", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

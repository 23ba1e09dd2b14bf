//! End-to-end smoke test against the facade crate: assemble the service from
//! root re-exports only and drive one full register/login/refresh pass.

use nestly::adapters::authentication::{Argon2Hasher, JwtCodec, JwtConfig};
use nestly::adapters::http::{AppState, ClientUrls};
use nestly::{AuthService, InMemoryUserStore, MockEmailClient, Secret};
use serde_json::{Value, json};

async fn spawn_service() -> String {
    let state = AppState::new(
        InMemoryUserStore::new(),
        MockEmailClient::new(),
        Argon2Hasher::new(argon2::Params::new(1024, 1, 1, None).unwrap()),
        JwtCodec::new(JwtConfig::new(Secret::from("smoke-test-key".to_string()))),
        ClientUrls::from_base("http://localhost:3000"),
    );

    let listener = nestly::tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    nestly::tokio::spawn(AuthService::new(state).run(listener));
    address
}

#[tokio::test]
async fn test_register_login_refresh_roundtrip() {
    let address = spawn_service().await;
    let client = reqwest::Client::new();

    let bundle: Value = client
        .post(format!("{address}/register"))
        .json(&json!({ "email": "smoke@example.com", "password": "password123" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bundle["user"]["email"], "smoke@example.com");

    let login: Value = client
        .post(format!("{address}/login"))
        .json(&json!({ "email": "smoke@example.com", "password": "password123" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let refreshed = client
        .get(format!("{address}/refresh-token"))
        .header("refresh_token", login["refreshToken"].as_str().unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(refreshed.status(), 200);
}

use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use secrecy::Secret;
use serde::Deserialize;

use crate::authentication::{ACCESS_TTL_SECONDS, REFRESH_TTL_SECONDS};

/// Runtime configuration, layered: built-in defaults, then an optional
/// `config/default.json`, then `NESTLY__`-prefixed environment variables.
/// Secrets have no defaults; startup fails without them.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub postgres: PostgresSettings,
    pub jwt: JwtSettings,
    pub email_client: EmailClientSettings,
    pub client: ClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub reply_to: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

/// Public base URL of the frontend; recovery email links point into it.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    pub base_url: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.address", "0.0.0.0:8000")?
            .set_default("postgres.max_connections", 5i64)?
            .set_default("jwt.access_ttl_seconds", ACCESS_TTL_SECONDS)?
            .set_default("jwt.refresh_ttl_seconds", REFRESH_TTL_SECONDS)?
            .set_default("email_client.base_url", "https://api.postmarkapp.com")?
            .set_default("email_client.timeout_millis", 10_000i64)?
            .set_default("client.base_url", "http://localhost:3000")?
            .add_source(File::new("config/default", FileFormat::Json).required(false))
            .add_source(Environment::with_prefix("NESTLY").separator("__"))
            .build()?
            .try_deserialize()
    }
}

mod auth_service;
mod helpers;
mod telemetry;

pub use auth_service::AuthService;
pub use helpers::{configure_postgresql, get_postgres_pool};
pub use telemetry::init_tracing;

// Re-export commonly used types
pub use nestly_core::{CredentialHasher, Email, EmailClient, TokenCodec, UserStore};

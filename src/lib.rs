//! # Nestly - Identity and Session Service Library
//!
//! This is a facade crate that re-exports all public APIs from the nestly
//! service components. Use this crate to get access to the whole identity
//! stack in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! nestly = { path = "../nestly" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, etc.
//! - **Ports**: `UserStore`, `CredentialHasher`, `TokenCodec`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `JwtCodec`, `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService` - The main entry point for the identity service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use nestly_core::*;
}

// Re-export most commonly used core types at the root level
pub use nestly_core::{
    AuthToken, Email, Password, RecoveryCode, Role, SanitizedUser, SessionBundle, User, UserId,
    Username,
};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use nestly_core::ports::repositories::{NewUser, UserStore, UserStoreError};
    pub use nestly_core::ports::services::{
        CredentialHasher, EmailClient, HashingError, TokenCodec, TokenError,
    };
}

// Re-export port traits at root level
pub use nestly_core::{
    CredentialHasher, EmailClient, TokenCodec, TokenError, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use nestly_application::*;
}

// Re-export use cases at root level
pub use nestly_application::{
    AccessAccountUseCase, ActivateUseCase, ForgotPasswordUseCase, LoginUseCase, PreRegisterUseCase,
    RefreshUseCase, RegisterUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP state, access gate, and route handlers
    pub mod http {
        pub use nestly_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use nestly_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use nestly_adapters::email::*;
    }

    /// Token codec and credential hashing
    pub mod authentication {
        pub use nestly_adapters::authentication::*;
    }

    /// Configuration
    pub mod config {
        pub use nestly_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use nestly_adapters::{
    authentication::{Argon2Hasher, JwtCodec, JwtConfig},
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{InMemoryUserStore, PostgresUserStore},
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main identity service
pub use nestly_auth_service::{AuthService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

/// Re-export axum so the service router can be mounted into a host app
pub use axum;

/// Re-export tokio for binaries embedding the service
pub use tokio;

pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    password::{CredentialHash, Password, PasswordError},
    recovery_code::RecoveryCode,
    role::{Role, RoleError},
    session::{AuthToken, SessionBundle},
    user::{SanitizedUser, User, UserId},
    username::{Username, UsernameError},
};

pub use ports::{
    repositories::{NewUser, UserStore, UserStoreError},
    services::{CredentialHasher, EmailClient, HashingError, TokenCodec, TokenError},
};

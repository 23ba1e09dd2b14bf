use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    email::Email, password::CredentialHash, recovery_code::RecoveryCode, role::Role,
    username::Username,
};

/// Opaque, store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid user id")]
pub struct UserIdError;

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(raw).map(Self).map_err(|_| UserIdError)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The durable identity record. The stored credential and recovery code never
/// leave the server; clients only ever see the `SanitizedUser` view.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    credential: CredentialHash,
    roles: Vec<Role>,
    recovery_code: Option<RecoveryCode>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: Username, email: Email, credential: CredentialHash) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            credential,
            roles: vec![Role::Buyer],
            recovery_code: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from persisted parts. Used by store implementations.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        username: Username,
        email: Email,
        credential: CredentialHash,
        roles: Vec<Role>,
        recovery_code: Option<RecoveryCode>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            credential,
            roles,
            recovery_code,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn credential(&self) -> &CredentialHash {
        &self.credential
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn recovery_code(&self) -> Option<&RecoveryCode> {
        self.recovery_code.as_ref()
    }

    pub fn set_recovery_code(&mut self, code: Option<RecoveryCode>) {
        self.recovery_code = code;
        self.updated_at = Utc::now();
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Client-facing view with the credential and recovery code cleared.
    pub fn sanitized(&self) -> SanitizedUser {
        SanitizedUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.roles.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// What a client is allowed to see of a user record. `role` keeps the
/// source system's wire name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedUser {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub role: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

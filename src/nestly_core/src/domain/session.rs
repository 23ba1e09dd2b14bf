use serde::{Deserialize, Serialize};

use crate::domain::user::SanitizedUser;

/// A signed, self-contained token string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for AuthToken {
    fn from(s: String) -> Self {
        AuthToken(s)
    }
}

/// The response shape every successful authentication path produces: a
/// short-lived access token, a long-lived refresh token, and the sanitized
/// user. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBundle {
    pub token: AuthToken,
    pub refresh_token: AuthToken,
    pub user: SanitizedUser,
}

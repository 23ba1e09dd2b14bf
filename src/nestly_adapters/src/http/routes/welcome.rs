use axum::Json;
use axum::extract::State;
use nestly_core::{CredentialHasher, EmailClient, TokenCodec, UserStore};

use crate::http::app_state::AppState;
use crate::http::auth_gate::AuthenticatedUser;

/// Smoke endpoint behind the access gate.
#[tracing::instrument(name = "Welcome", skip_all)]
pub async fn welcome<U, E, H, C>(
    State(_state): State<AppState<U, E, H, C>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Json<serde_json::Value>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    tracing::debug!(%user_id, "welcome request admitted");
    Json(serde_json::json!({ "data": "hello" }))
}

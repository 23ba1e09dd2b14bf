use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use nestly_application::RefreshUseCase;
use nestly_core::{AuthToken, CredentialHasher, EmailClient, SessionBundle, TokenCodec, UserStore};

use crate::http::app_state::AppState;
use crate::http::routes::error::ApiError;

/// The client sends its refresh token in this header.
const REFRESH_TOKEN_HEADER: &str = "refresh_token";

#[tracing::instrument(name = "Refresh session", skip_all)]
pub async fn refresh<U, E, H, C>(
    State(state): State<AppState<U, E, H, C>>,
    headers: HeaderMap,
) -> Result<Json<SessionBundle>, ApiError>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    let token = headers
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let use_case = RefreshUseCase::new(state.user_store, state.codec);
    let bundle = use_case
        .execute(&AuthToken::from(token.to_string()))
        .await?;
    Ok(Json(bundle))
}

use axum::Json;
use axum::extract::State;
use nestly_application::AccessAccountUseCase;
use nestly_core::{
    AuthToken, CredentialHasher, EmailClient, SessionBundle, TokenCodec, UserStore,
};
use serde::Deserialize;

use crate::http::app_state::AppState;
use crate::http::routes::error::ApiError;

#[derive(Deserialize)]
pub struct AccessAccountRequest {
    /// The mailed reset token; the wire field keeps its historical name.
    #[serde(rename = "resetCode")]
    pub reset_token: AuthToken,
}

#[tracing::instrument(name = "Access account", skip_all)]
pub async fn access_account<U, E, H, C>(
    State(state): State<AppState<U, E, H, C>>,
    Json(request): Json<AccessAccountRequest>,
) -> Result<Json<SessionBundle>, ApiError>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    let use_case = AccessAccountUseCase::new(state.user_store, state.codec);
    let bundle = use_case.execute(&request.reset_token).await?;
    Ok(Json(bundle))
}

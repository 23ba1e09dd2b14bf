use axum::Json;
use axum::extract::State;
use nestly_application::ActivateUseCase;
use nestly_core::{
    AuthToken, CredentialHasher, EmailClient, SessionBundle, TokenCodec, UserStore,
};
use serde::Deserialize;

use crate::http::app_state::AppState;
use crate::http::routes::error::ApiError;

#[derive(Deserialize)]
pub struct ActivateRequest {
    pub token: AuthToken,
}

#[tracing::instrument(name = "Activate account", skip_all)]
pub async fn activate<U, E, H, C>(
    State(state): State<AppState<U, E, H, C>>,
    Json(request): Json<ActivateRequest>,
) -> Result<Json<SessionBundle>, ApiError>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    let use_case = ActivateUseCase::new(state.user_store, state.hasher, state.codec);
    let bundle = use_case.execute(&request.token).await?;
    Ok(Json(bundle))
}

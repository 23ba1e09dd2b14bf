use axum::Json;
use axum::extract::State;
use nestly_application::RegisterUseCase;
use nestly_core::{
    CredentialHasher, Email, EmailClient, Password, SessionBundle, TokenCodec, UserStore,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::http::app_state::AppState;
use crate::http::routes::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
}

pub(crate) fn empty_secret() -> Secret<String> {
    Secret::from(String::new())
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, E, H, C>(
    State(state): State<AppState<U, E, H, C>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<SessionBundle>, ApiError>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    let email = Email::parse(&request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RegisterUseCase::new(state.user_store, state.hasher, state.codec);
    let bundle = use_case.execute(email, password).await?;
    Ok(Json(bundle))
}

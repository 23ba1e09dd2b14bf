use axum::Json;
use axum::extract::State;
use nestly_application::LoginUseCase;
use nestly_core::{
    CredentialHasher, Email, EmailClient, Password, SessionBundle, TokenCodec, UserStore,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::http::app_state::AppState;
use crate::http::routes::error::ApiError;
use crate::http::routes::register::empty_secret;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, E, H, C>(
    State(state): State<AppState<U, E, H, C>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionBundle>, ApiError>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    let email = Email::parse(&request.email)?;
    // Signup length rules do not apply to a login candidate.
    let password = Password::candidate(request.password)?;

    let use_case = LoginUseCase::new(state.user_store, state.hasher, state.codec);
    let bundle = use_case.execute(email, password).await?;
    Ok(Json(bundle))
}

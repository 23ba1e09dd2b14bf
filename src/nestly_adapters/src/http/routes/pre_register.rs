use axum::Json;
use axum::extract::State;
use nestly_application::PreRegisterUseCase;
use nestly_core::{CredentialHasher, Email, EmailClient, Password, TokenCodec, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use crate::http::app_state::AppState;
use crate::http::routes::error::ApiError;
use crate::http::routes::forgot_password::DispatchResponse;
use crate::http::routes::register::empty_secret;

#[derive(Deserialize)]
pub struct PreRegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Pre-register", skip_all)]
pub async fn pre_register<U, E, H, C>(
    State(state): State<AppState<U, E, H, C>>,
    Json(request): Json<PreRegisterRequest>,
) -> Result<Json<DispatchResponse>, ApiError>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    let email = Email::parse(&request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = PreRegisterUseCase::new(
        state.user_store,
        state.email_client,
        state.codec,
        state.urls.account_activate,
    );
    let outcome = use_case.execute(email, password).await?;
    Ok(Json(DispatchResponse {
        ok: outcome.delivered,
    }))
}

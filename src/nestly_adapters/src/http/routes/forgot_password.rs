use axum::Json;
use axum::extract::State;
use nestly_application::ForgotPasswordUseCase;
use nestly_core::{CredentialHasher, Email, EmailClient, TokenCodec, UserStore};
use serde::{Deserialize, Serialize};

use crate::http::app_state::AppState;
use crate::http::routes::error::ApiError;

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

/// Acknowledgement for the flows that only dispatch an email. `ok` reports
/// whether the message was accepted for delivery.
#[derive(Serialize, Deserialize)]
pub struct DispatchResponse {
    pub ok: bool,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<U, E, H, C>(
    State(state): State<AppState<U, E, H, C>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<DispatchResponse>, ApiError>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    let email = Email::parse(&request.email)?;

    let use_case = ForgotPasswordUseCase::new(
        state.user_store,
        state.email_client,
        state.codec,
        state.urls.access_account,
    );
    let outcome = use_case.execute(email).await?;
    Ok(Json(DispatchResponse {
        ok: outcome.delivered,
    }))
}

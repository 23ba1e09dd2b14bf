use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use nestly_core::{AuthToken, CredentialHasher, EmailClient, TokenCodec, UserId, UserStore};

use crate::http::app_state::AppState;
use crate::http::routes::error::ApiError;

/// Admits a request only if it carries a valid access token in the
/// `authorization` header. The signed claims are trusted as-is; there is no
/// store lookup, so a deleted subject stays admissible until the token
/// expires.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub UserId);

impl<U, E, H, C> FromRequestParts<AppState<U, E, H, C>> for AuthenticatedUser
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U, E, H, C>,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;
        // Clients send the bare token; tolerate a Bearer prefix.
        let raw = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();

        let subject = state
            .codec
            .verify_subject(&AuthToken::from(raw.to_string()))
            .map_err(|_| ApiError::Unauthorized)?;
        Ok(AuthenticatedUser(subject))
    }
}

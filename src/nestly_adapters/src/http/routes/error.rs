use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nestly_core::{EmailError, HashingError, PasswordError, TokenError, UserStoreError};
use nestly_application::{
    AccessAccountError, ActivateError, ForgotPasswordError, LoginError, PreRegisterError,
    RefreshError, RegisterError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The uniform failure shape: every non-2xx response is `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Everything a handler can fail with, mapped onto a status code and a
/// client-safe message in one place. `Internal` keeps its detail out of the
/// response body; it only reaches the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("This email has been taken, try log in")]
    EmailTaken,
    #[error("Could not find user with the Email")]
    UserNotFound,
    #[error("Reset code is invalid or already used")]
    RecoveryCodeNotFound,
    #[error("Wrong password")]
    WrongPassword,
    #[error("Invalid or Expired token")]
    Unauthorized,
    #[error("Something went wrong. Try again")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(%detail, "request failed with internal error");
        }
        let status = match &self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::EmailTaken => StatusCode::CONFLICT,
            ApiError::UserNotFound | ApiError::RecoveryCodeNotFound => StatusCode::NOT_FOUND,
            ApiError::WrongPassword | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<HashingError> for ApiError {
    fn from(error: HashingError) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid | TokenError::Expired => ApiError::Unauthorized,
            TokenError::UnexpectedError(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::EmailTaken => ApiError::EmailTaken,
            UserStoreError::UserNotFound => ApiError::UserNotFound,
            UserStoreError::RecoveryCodeNotFound => ApiError::RecoveryCodeNotFound,
            // Surfacing here means the use case exhausted its retries.
            UserStoreError::UsernameTaken => {
                ApiError::Internal("username collision retries exhausted".to_string())
            }
            UserStoreError::UnexpectedError(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserStoreError(e) => e.into(),
            RegisterError::HashingError(e) => e.into(),
            RegisterError::TokenError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::CredentialMismatch => ApiError::WrongPassword,
            LoginError::UserStoreError(e) => e.into(),
            LoginError::HashingError(e) => e.into(),
            LoginError::TokenError(e) => e.into(),
        }
    }
}

impl From<RefreshError> for ApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::TokenError(e) => e.into(),
            RefreshError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::UserStoreError(e) => e.into(),
            ForgotPasswordError::TokenError(e) => e.into(),
        }
    }
}

impl From<AccessAccountError> for ApiError {
    fn from(error: AccessAccountError) -> Self {
        match error {
            AccessAccountError::TokenError(e) => e.into(),
            AccessAccountError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<PreRegisterError> for ApiError {
    fn from(error: PreRegisterError) -> Self {
        match error {
            PreRegisterError::EmailTaken => ApiError::EmailTaken,
            PreRegisterError::UserStoreError(e) => e.into(),
            PreRegisterError::TokenError(e) => e.into(),
        }
    }
}

impl From<ActivateError> for ApiError {
    fn from(error: ActivateError) -> Self {
        match error {
            ActivateError::TokenError(e) => e.into(),
            ActivateError::RegisterError(e) => e.into(),
        }
    }
}

use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use nestly_core::{AuthToken, Email, Password, RecoveryCode, TokenCodec, TokenError, UserId};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, de::DeserializeOwned, ser::SerializeStruct};

/// Access tokens live one hour, refresh tokens seven days.
pub const ACCESS_TTL_SECONDS: i64 = 60 * 60;
pub const REFRESH_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl JwtConfig {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            secret,
            access_ttl_seconds: ACCESS_TTL_SECONDS,
            refresh_ttl_seconds: REFRESH_TTL_SECONDS,
        }
    }
}

/// HS256 implementation of the token scheme. All four token purposes are
/// signed with the same key; they stay distinguishable because each carries
/// a different claim set, and decoding enforces the expected one.
#[derive(Clone)]
pub struct JwtCodec {
    config: JwtConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct SubjectClaims {
    sub: String,
    exp: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    reset_code: String,
    exp: usize,
}

#[derive(Debug, Deserialize)]
struct ActivationClaims {
    email: String,
    password: Secret<String>,
    exp: usize,
}

impl Serialize for ActivationClaims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ActivationClaims", 3)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}

impl JwtCodec {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    fn secret_bytes(&self) -> &[u8] {
        self.config.secret.expose_secret().as_bytes()
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<AuthToken, TokenError> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret_bytes()),
        )
        .map(AuthToken::from)
        .map_err(|error| TokenError::UnexpectedError(error.to_string()))
    }

    fn decode_claims<T: DeserializeOwned>(&self, token: &AuthToken) -> Result<T, TokenError> {
        decode::<T>(
            token.as_str(),
            &DecodingKey::from_secret(self.secret_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|error| match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }

    fn expiry(&self, ttl_seconds: i64) -> Result<usize, TokenError> {
        let ttl = chrono::Duration::try_seconds(ttl_seconds).ok_or_else(|| {
            TokenError::UnexpectedError("Failed to create token lifetime".to_string())
        })?;
        let expiry = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::UnexpectedError("Token expiry out of range".to_string()))?
            .timestamp();
        expiry
            .try_into()
            .map_err(|_| TokenError::UnexpectedError("Failed to cast i64 to usize".to_string()))
    }
}

impl TokenCodec for JwtCodec {
    fn issue_access(&self, subject: &UserId) -> Result<AuthToken, TokenError> {
        self.sign(&SubjectClaims {
            sub: subject.to_string(),
            exp: self.expiry(self.config.access_ttl_seconds)?,
        })
    }

    fn issue_refresh(&self, subject: &UserId) -> Result<AuthToken, TokenError> {
        self.sign(&SubjectClaims {
            sub: subject.to_string(),
            exp: self.expiry(self.config.refresh_ttl_seconds)?,
        })
    }

    fn verify_subject(&self, token: &AuthToken) -> Result<UserId, TokenError> {
        let claims: SubjectClaims = self.decode_claims(token)?;
        UserId::parse(&claims.sub).map_err(|_| TokenError::Invalid)
    }

    fn issue_reset(&self, code: &RecoveryCode) -> Result<AuthToken, TokenError> {
        self.sign(&ResetClaims {
            reset_code: code.as_str().to_string(),
            exp: self.expiry(self.config.access_ttl_seconds)?,
        })
    }

    fn verify_reset(&self, token: &AuthToken) -> Result<RecoveryCode, TokenError> {
        let claims: ResetClaims = self.decode_claims(token)?;
        RecoveryCode::parse(&claims.reset_code).map_err(|_| TokenError::Invalid)
    }

    fn issue_activation(&self, email: &Email, password: &Password) -> Result<AuthToken, TokenError> {
        self.sign(&ActivationClaims {
            email: email.as_ref().to_string(),
            password: password.as_ref().clone(),
            exp: self.expiry(self.config.access_ttl_seconds)?,
        })
    }

    fn verify_activation(&self, token: &AuthToken) -> Result<(Email, Password), TokenError> {
        let claims: ActivationClaims = self.decode_claims(token)?;
        let email = Email::parse(&claims.email).map_err(|_| TokenError::Invalid)?;
        let password = Password::try_from(claims.password).map_err(|_| TokenError::Invalid)?;
        Ok((email, password))
    }
}

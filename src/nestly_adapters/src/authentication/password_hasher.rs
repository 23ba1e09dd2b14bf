use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{SaltString, rand_core},
};
use async_trait::async_trait;
use nestly_core::{CredentialHash, CredentialHasher, HashingError, Password};
use secrecy::ExposeSecret;

// Work factor in the same ballpark as the bcrypt cost the stored hashes
// previously used.
const DEFAULT_M_COST: u32 = 15000;
const DEFAULT_T_COST: u32 = 2;
const DEFAULT_P_COST: u32 = 1;

/// Argon2id credential hasher. Hashing is CPU-bound by design, so both
/// operations run on the blocking pool.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            params: Params::new(DEFAULT_M_COST, DEFAULT_T_COST, DEFAULT_P_COST, None)
                .expect("default argon2 params are valid"),
        }
    }
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing credential hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<CredentialHash, HashingError> {
        let password = password.clone();
        let hasher = self.argon2();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let salt = SaltString::generate(rand_core::OsRng);
                hasher
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|hash| CredentialHash::new(hash.to_string()))
                    .map_err(|error| HashingError(error.to_string()))
            })
        })
        .await
        .map_err(|error| HashingError(error.to_string()))?
    }

    #[tracing::instrument(name = "Verifying credential hash", skip_all)]
    async fn verify(
        &self,
        candidate: &Password,
        stored: &CredentialHash,
    ) -> Result<bool, HashingError> {
        let candidate = candidate.clone();
        let stored = stored.as_ref().expose_secret().clone();
        let verifier = self.argon2();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let parsed =
                    PasswordHash::new(&stored).map_err(|error| HashingError(error.to_string()))?;
                match verifier
                    .verify_password(candidate.as_ref().expose_secret().as_bytes(), &parsed)
                {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(error) => Err(HashingError(error.to_string())),
                }
            })
        })
        .await
        .map_err(|error| HashingError(error.to_string()))?
    }
}

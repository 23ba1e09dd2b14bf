use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nestly_core::{
    CredentialHash, Email, NewUser, RecoveryCode, Role, User, UserId, UserStore, UserStoreError,
    Username,
};
use secrecy::ExposeSecret;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

/// Postgres-backed `UserStore`. "No pending reset" is stored as an empty
/// `reset_code`, and consumption is a single conditional `UPDATE`, so a code
/// can only ever be spent once.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, roles, reset_code, created_at, updated_at";

#[async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Inserting user row", skip_all)]
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let user = User::new(new_user.username, new_user.email, new_user.credential);
        let roles: Vec<String> = user
            .roles()
            .iter()
            .map(|role| role.as_str().to_string())
            .collect();

        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, roles, reset_code, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, '', $6, $7)",
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.email().as_str())
        .bind(user.credential().as_ref().expose_secret())
        .bind(&roles)
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(constraint_error)?;

        Ok(user)
    }

    #[tracing::instrument(name = "Fetching user by email", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .map(row_to_user)
        .transpose()?
        .ok_or(UserStoreError::UserNotFound)
    }

    #[tracing::instrument(name = "Fetching user by id", skip_all)]
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(row_to_user)
            .transpose()?
            .ok_or(UserStoreError::UserNotFound)
    }

    #[tracing::instrument(name = "Storing recovery code", skip_all)]
    async fn set_recovery_code(
        &self,
        email: &Email,
        code: &RecoveryCode,
    ) -> Result<User, UserStoreError> {
        sqlx::query(&format!(
            "UPDATE users SET reset_code = $1, updated_at = now() \
             WHERE email = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(code.as_str())
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .map(row_to_user)
        .transpose()?
        .ok_or(UserStoreError::UserNotFound)
    }

    #[tracing::instrument(name = "Consuming recovery code", skip_all)]
    async fn consume_recovery_code(&self, code: &RecoveryCode) -> Result<User, UserStoreError> {
        // The conditional update clears the code and returns the row in one
        // statement; concurrent redeemers race on it and only one row wins.
        sqlx::query(&format!(
            "UPDATE users SET reset_code = '', updated_at = now() \
             WHERE reset_code = $1 AND reset_code <> '' RETURNING {USER_COLUMNS}"
        ))
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .map(row_to_user)
        .transpose()?
        .ok_or(UserStoreError::RecoveryCodeNotFound)
    }
}

fn row_to_user(row: PgRow) -> Result<User, UserStoreError> {
    let id: Uuid = row.try_get("id").map_err(unexpected)?;
    let username: String = row.try_get("username").map_err(unexpected)?;
    let email: String = row.try_get("email").map_err(unexpected)?;
    let password_hash: String = row.try_get("password_hash").map_err(unexpected)?;
    let roles: Vec<String> = row.try_get("roles").map_err(unexpected)?;
    let reset_code: String = row.try_get("reset_code").map_err(unexpected)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unexpected)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(unexpected)?;

    let roles = roles
        .iter()
        .map(|role| Role::parse(role))
        .collect::<Result<Vec<_>, _>>()
        .map_err(unexpected)?;
    let recovery_code = if reset_code.is_empty() {
        None
    } else {
        Some(RecoveryCode::parse(&reset_code).map_err(unexpected)?)
    };

    Ok(User::from_parts(
        UserId::from(id),
        Username::parse(&username).map_err(unexpected)?,
        Email::parse(&email).map_err(unexpected)?,
        CredentialHash::new(password_hash),
        roles,
        recovery_code,
        created_at,
        updated_at,
    ))
}

fn constraint_error(error: sqlx::Error) -> UserStoreError {
    if let Some(db_error) = error.as_database_error() {
        match db_error.constraint() {
            Some("users_email_key") => return UserStoreError::EmailTaken,
            Some("users_username_key") => return UserStoreError::UsernameTaken,
            _ => {}
        }
    }
    UserStoreError::UnexpectedError(error.to_string())
}

fn unexpected(error: impl ToString) -> UserStoreError {
    UserStoreError::UnexpectedError(error.to_string())
}

use nestly_adapters::config::PostgresSettings;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create the connection pool and bring the schema up to date.
///
/// # Panics
/// Panics if the pool cannot be created or a migration fails; the service
/// cannot run without its database.
pub async fn configure_postgresql(settings: &PostgresSettings) -> PgPool {
    let pool = get_postgres_pool(settings.url.expose_secret(), settings.max_connections)
        .await
        .expect("Failed to create Postgres connection pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

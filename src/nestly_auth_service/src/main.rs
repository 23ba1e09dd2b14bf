use nestly_adapters::authentication::{Argon2Hasher, JwtCodec, JwtConfig};
use nestly_adapters::config::Settings;
use nestly_adapters::email::PostmarkEmailClient;
use nestly_adapters::http::{AppState, ClientUrls};
use nestly_adapters::persistence::PostgresUserStore;
use nestly_auth_service::{AuthService, configure_postgresql, init_tracing};
use nestly_core::Email;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = Settings::load()?;

    let pool = configure_postgresql(&settings.postgres).await;
    let user_store = PostgresUserStore::new(pool);

    let http_client = reqwest::Client::builder()
        .timeout(settings.email_client.timeout())
        .build()?;
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::parse(&settings.email_client.sender)?,
        Email::parse(&settings.email_client.reply_to)?,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    let hasher = Argon2Hasher::default();
    let codec = JwtCodec::new(JwtConfig {
        secret: settings.jwt.secret.clone(),
        access_ttl_seconds: settings.jwt.access_ttl_seconds,
        refresh_ttl_seconds: settings.jwt.refresh_ttl_seconds,
    });

    let state = AppState::new(
        user_store,
        email_client,
        hasher,
        codec,
        ClientUrls::from_base(&settings.client.base_url),
    );

    let listener = TcpListener::bind(&settings.app.address).await?;
    AuthService::new(state).run(listener).await?;

    Ok(())
}

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use nestly_adapters::http::AppState;
use nestly_adapters::http::routes::{
    access_account, activate, forgot_password, login, pre_register, refresh, register, welcome,
};
use nestly_core::{CredentialHasher, EmailClient, TokenCodec, UserStore};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// The assembled identity service: the full route table over one injected
/// `AppState`, with tracing and CORS layered on top.
pub struct AuthService {
    router: Router,
}

impl AuthService {
    pub fn new<U, E, H, C>(state: AppState<U, E, H, C>) -> Self
    where
        U: UserStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        H: CredentialHasher + Clone + 'static,
        C: TokenCodec + Clone + 'static,
    {
        let router = Router::new()
            .route("/", get(welcome::<U, E, H, C>))
            .route("/pre-register", post(pre_register::<U, E, H, C>))
            .route("/register", post(register::<U, E, H, C>))
            .route("/account-activate", post(activate::<U, E, H, C>))
            .route("/login", post(login::<U, E, H, C>))
            .route("/forgot-password", post(forgot_password::<U, E, H, C>))
            .route("/access-account", post(access_account::<U, E, H, C>))
            .route("/refresh-token", get(refresh::<U, E, H, C>))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router so it can be served or nested elsewhere.
    pub fn into_router(self) -> Router {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_origin(Any)
            .allow_headers(Any);

        self.with_trace_layer().router.layer(cors)
    }

    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

pub mod app_state;
pub mod auth_gate;
pub mod routes;

pub use app_state::{AppState, ClientUrls};
pub use auth_gate::AuthenticatedUser;

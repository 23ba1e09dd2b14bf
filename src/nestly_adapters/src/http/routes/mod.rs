pub mod access_account;
pub mod activate;
pub mod error;
pub mod forgot_password;
pub mod login;
pub mod pre_register;
pub mod refresh;
pub mod register;
pub mod welcome;

pub use access_account::access_account;
pub use activate::activate;
pub use error::{ApiError, ErrorResponse};
pub use forgot_password::{DispatchResponse, forgot_password};
pub use login::login;
pub use pre_register::pre_register;
pub use refresh::refresh;
pub use register::register;
pub use welcome::welcome;

pub mod email;
pub mod password;
pub mod recovery_code;
pub mod role;
pub mod session;
pub mod user;
pub mod username;

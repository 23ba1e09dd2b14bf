pub mod access_account;
pub mod activate;
pub mod forgot_password;
pub mod login;
pub mod pre_register;
pub mod refresh;
pub mod register;

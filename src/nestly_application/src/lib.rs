pub mod session;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use session::issue_session;
pub use use_cases::{
    access_account::{AccessAccountError, AccessAccountUseCase},
    activate::{ActivateError, ActivateUseCase},
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase, ResetRequested},
    login::{LoginError, LoginUseCase},
    pre_register::{ActivationRequested, PreRegisterError, PreRegisterUseCase},
    refresh::{RefreshError, RefreshUseCase},
    register::{RegisterError, RegisterUseCase},
};

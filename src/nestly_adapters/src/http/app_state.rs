use nestly_core::{CredentialHasher, EmailClient, TokenCodec, UserStore};

/// Links the client follows from recovery emails, derived once at startup
/// from the public client base URL.
#[derive(Debug, Clone)]
pub struct ClientUrls {
    pub access_account: String,
    pub account_activate: String,
}

impl ClientUrls {
    pub fn from_base(client_url: &str) -> Self {
        let base = client_url.trim_end_matches('/');
        Self {
            access_account: format!("{base}/auth/access-account"),
            account_activate: format!("{base}/auth/account-activate"),
        }
    }
}

/// Everything the route handlers need, injected as one state value.
#[derive(Clone)]
pub struct AppState<U, E, H, C>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    pub user_store: U,
    pub email_client: E,
    pub hasher: H,
    pub codec: C,
    pub urls: ClientUrls,
}

impl<U, E, H, C> AppState<U, E, H, C>
where
    U: UserStore + Clone,
    E: EmailClient + Clone,
    H: CredentialHasher + Clone,
    C: TokenCodec + Clone,
{
    pub fn new(user_store: U, email_client: E, hasher: H, codec: C, urls: ClientUrls) -> Self {
        Self {
            user_store,
            email_client,
            hasher,
            codec,
            urls,
        }
    }
}

use nestly_core::{SessionBundle, TokenCodec, TokenError, User};

/// Mint a full session bundle for an authenticated user.
///
/// This is the single chokepoint every successful authentication path funnels
/// through (registration, login, reset completion, activation, refresh), so
/// the response shape is identical everywhere: fresh access token, fresh
/// refresh token, sanitized user. Pure token minting, no I/O.
pub fn issue_session<C: TokenCodec>(codec: &C, user: &User) -> Result<SessionBundle, TokenError> {
    let token = codec.issue_access(user.id())?;
    let refresh_token = codec.issue_refresh(user.id())?;

    Ok(SessionBundle {
        token,
        refresh_token,
        user: user.sanitized(),
    })
}

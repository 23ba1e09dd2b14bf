mod jwt_codec;
mod password_hasher;

pub use jwt_codec::{ACCESS_TTL_SECONDS, JwtCodec, JwtConfig, REFRESH_TTL_SECONDS};
pub use password_hasher::Argon2Hasher;

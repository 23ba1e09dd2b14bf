mod settings;

pub use settings::{
    AppSettings, ClientSettings, EmailClientSettings, JwtSettings, PostgresSettings, Settings,
};

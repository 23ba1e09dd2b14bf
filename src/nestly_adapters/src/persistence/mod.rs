mod in_memory_user_store;
mod postgres_user_store;

pub use in_memory_user_store::InMemoryUserStore;
pub use postgres_user_store::PostgresUserStore;

//! Database connection management and the SQLite post store.

mod connection;
pub mod entity;
mod sqlite_repo;

pub use connection::{DatabaseConfig, connect};
pub use sqlite_repo::SqlitePostRepository;

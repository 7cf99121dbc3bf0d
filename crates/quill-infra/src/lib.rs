//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the SQLite post store (SeaORM) and the JWT
//! session gate.

pub mod auth;
pub mod database;

pub use auth::{JwtSessionGate, SessionConfig};
pub use database::{DatabaseConfig, SqlitePostRepository, connect};

//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::DbConn;

use quill_core::ports::PostRepository;
use quill_infra::SqlitePostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state around an already-open storage handle.
    pub fn new(db: DbConn) -> Self {
        let posts: Arc<dyn PostRepository> = Arc::new(SqlitePostRepository::new(db));

        tracing::info!("Application state initialized");

        Self { posts }
    }
}

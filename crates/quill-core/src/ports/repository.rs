use async_trait::async_trait;

use crate::domain::{Post, PostDraft};
use crate::error::RepoError;

/// Post store - durable CRUD for [`Post`] entities.
///
/// Identity and timestamps are server-assigned: callers hand over a
/// validated [`PostDraft`] and observe the round-tripped row.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post, newest `created_at` first (ties broken by id, descending).
    /// An empty store yields `Ok(vec![])`, never an error.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by id. `None` is a normal outcome, not an error.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Persist a new post: assigns the id and sets
    /// `created_at == updated_at == now`. Returns the stored row.
    async fn create(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Full replace of the mutable fields, refreshing `updated_at` and
    /// leaving `id` and `created_at` untouched. Fails with
    /// [`RepoError::NotFound`] when no row matches - never a fabricated
    /// success.
    async fn update(&self, id: i64, draft: PostDraft) -> Result<Post, RepoError>;

    /// Hard delete. Returns whether a row was actually removed;
    /// `Ok(false)` when the id did not exist.
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}

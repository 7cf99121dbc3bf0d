use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Upper bound on the opaque `image` field. The presentation layer may
/// inline images as data URLs, so this has to be generous but finite.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

/// Post entity - a persisted blog post.
///
/// `id`, `created_at` and `updated_at` are assigned by the store;
/// `content` and `image` are opaque to the core and rendered elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The validated full set of mutable post fields.
///
/// Both create and update consume a draft: updates are full-field
/// replacements, not patches. Construction is the validation boundary -
/// a draft that exists is a draft the store may persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub image: Option<String>,
}

impl PostDraft {
    /// Validate and build a draft.
    ///
    /// `title` and `content` must be non-empty after trimming; `image`
    /// must stay under [`MAX_IMAGE_BYTES`].
    pub fn new(
        title: String,
        description: Option<String>,
        content: String,
        image: Option<String>,
    ) -> Result<Self, DomainError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if content.trim().is_empty() {
            return Err(DomainError::Validation("content must not be empty".into()));
        }
        if let Some(image) = &image {
            if image.len() > MAX_IMAGE_BYTES {
                return Err(DomainError::Validation(format!(
                    "image exceeds the {} byte limit",
                    MAX_IMAGE_BYTES
                )));
            }
        }

        Ok(Self {
            title,
            description,
            content,
            image,
        })
    }
}

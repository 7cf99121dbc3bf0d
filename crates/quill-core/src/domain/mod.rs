//! Domain entities - the core business objects.

mod post;

pub use post::{MAX_IMAGE_BYTES, Post, PostDraft};

//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::{NewPost, Post, PostUpdate};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Storage for posts keyed by their unique slug.
///
/// Each operation is atomic from the caller's point of view.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn get(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a new post. Fails with [`RepoError::Duplicate`] when the slug is taken.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Replace title and markdown of an existing post. Fails with
    /// [`RepoError::NotFound`] when no post has this slug.
    async fn update(&self, slug: &str, update: PostUpdate) -> Result<Post, RepoError>;

    /// All posts ordered by slug.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;
}

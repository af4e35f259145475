mod read;
mod types;
mod write;

use async_trait::async_trait;

use crate::application::repos::{PostStore, RepoError};
use crate::domain::posts::{NewPost, Post, PostUpdate};

use super::PostgresRepositories;

#[async_trait]
impl PostStore for PostgresRepositories {
    async fn get(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        self.fetch_post(slug).await
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        self.insert_post(post).await
    }

    async fn update(&self, slug: &str, update: PostUpdate) -> Result<Post, RepoError> {
        self.update_post_content(slug, update).await
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        self.fetch_posts().await
    }
}

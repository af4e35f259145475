use crate::domain::posts::Post;

use super::service::AdminPostService;
use super::types::AdminPostError;

impl AdminPostService {
    /// Load the post addressed by a route parameter.
    pub async fn load_post(&self, slug: &str) -> Result<Post, AdminPostError> {
        if slug.trim().is_empty() {
            return Err(AdminPostError::MissingParameter("slug"));
        }

        self.store
            .get(slug)
            .await?
            .ok_or_else(|| AdminPostError::NotFound {
                slug: slug.to_string(),
            })
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, AdminPostError> {
        Ok(self.store.list().await?)
    }
}

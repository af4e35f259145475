use crate::application::repos::RepoError;
use crate::domain::posts::Post;

use super::super::{PostgresRepositories, map_sqlx_error};
use super::types::PostRow;

impl PostgresRepositories {
    pub(super) async fn fetch_post(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT slug, title, markdown
            FROM posts
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Post::from))
    }

    pub(super) async fn fetch_posts(&self) -> Result<Vec<Post>, RepoError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT slug, title, markdown
            FROM posts
            ORDER BY slug
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }
}

use crate::application::repos::RepoError;
use crate::domain::posts::{NewPost, Post, PostUpdate};

use super::super::{PostgresRepositories, map_sqlx_error};
use super::types::PostRow;

impl PostgresRepositories {
    pub(super) async fn insert_post(&self, post: NewPost) -> Result<Post, RepoError> {
        let NewPost {
            slug,
            title,
            markdown,
        } = post;

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (slug, title, markdown, created_at, updated_at)
            VALUES ($1, $2, $3, now(), now())
            RETURNING slug, title, markdown
            "#,
        )
        .bind(slug.into_inner())
        .bind(title)
        .bind(markdown)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(Post::from(row))
    }

    pub(super) async fn update_post_content(
        &self,
        slug: &str,
        update: PostUpdate,
    ) -> Result<Post, RepoError> {
        let PostUpdate { title, markdown } = update;

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $2, markdown = $3, updated_at = now()
            WHERE slug = $1
            RETURNING slug, title, markdown
            "#,
        )
        .bind(slug)
        .bind(title)
        .bind(markdown)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(Post::from).ok_or(RepoError::NotFound)
    }
}

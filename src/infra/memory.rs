//! In-process post store used when no database is configured.

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::application::repos::{PostStore, RepoError};
use crate::domain::posts::{NewPost, Post, PostUpdate};

const SLUG_CONSTRAINT: &str = "posts_pkey";

#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    posts: DashMap<String, Post>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a post; the slug entry is claimed atomically.
    pub fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let NewPost {
            slug,
            title,
            markdown,
        } = post;

        match self.posts.entry(slug.into_inner()) {
            Entry::Occupied(_) => Err(RepoError::Duplicate {
                constraint: SLUG_CONSTRAINT.to_string(),
            }),
            Entry::Vacant(vacant) => {
                let record = Post {
                    slug: vacant.key().clone(),
                    title,
                    markdown,
                };
                vacant.insert(record.clone());
                Ok(record)
            }
        }
    }

    pub fn get_sync(&self, slug: &str) -> Option<Post> {
        self.posts.get(slug).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn get(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.get_sync(slug))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        self.insert(post)
    }

    async fn update(&self, slug: &str, update: PostUpdate) -> Result<Post, RepoError> {
        let mut entry = self.posts.get_mut(slug).ok_or(RepoError::NotFound)?;
        let PostUpdate { title, markdown } = update;
        entry.title = title;
        entry.markdown = markdown;
        Ok(entry.value().clone())
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        posts.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(posts)
    }
}

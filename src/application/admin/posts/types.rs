use thiserror::Error;

use crate::{
    application::repos::RepoError,
    domain::{error::DomainError, posts::PostFieldErrors},
};

#[derive(Debug, Error)]
pub enum AdminPostError {
    #[error("missing route parameter `{0}`")]
    MissingParameter(&'static str),
    #[error("post `{slug}` not found")]
    NotFound { slug: String },
    #[error("post submission is invalid: {0}")]
    Invalid(PostFieldErrors),
    #[error("malformed post submission: {0}")]
    Shape(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl AdminPostError {
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }
}

/// Label used on metrics and logs to tell the two forms apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostForm {
    Create,
    Edit,
}

impl PostForm {
    pub fn as_str(self) -> &'static str {
        match self {
            PostForm::Create => "create",
            PostForm::Edit => "edit",
        }
    }
}

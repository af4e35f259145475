use axum::{extract::rejection::FormRejection, http::StatusCode};
use serde::Deserialize;

use crate::application::error::HttpError;
use crate::domain::posts::PostSubmission;

/// Body of both post forms. Every field is optional at this stage so that a
/// missing input becomes a field error rather than a rejected request.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AdminPostForm {
    pub(crate) title: Option<String>,
    pub(crate) slug: Option<String>,
    pub(crate) markdown: Option<String>,
}

impl AdminPostForm {
    pub(crate) fn into_submission(self) -> PostSubmission {
        PostSubmission {
            title: self.title,
            slug: self.slug,
            markdown: self.markdown,
        }
    }
}

pub(crate) fn form_rejection(source: &'static str, rejection: FormRejection) -> HttpError {
    HttpError::new(
        source,
        StatusCode::BAD_REQUEST,
        "Malformed form submission",
        rejection.body_text(),
    )
}

use axum::http::StatusCode;

use crate::application::{admin::posts::AdminPostError, error::HttpError};
use crate::infra::http::repo_error_to_http;

pub(super) fn admin_post_error(source: &'static str, err: AdminPostError) -> HttpError {
    match err {
        AdminPostError::MissingParameter(name) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Post request could not be processed",
            format!("Missing route parameter `{name}`"),
        ),
        AdminPostError::NotFound { slug } => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Post not found",
            format!("post `{slug}` not found"),
        ),
        AdminPostError::Shape(message) => HttpError::new(
            source,
            StatusCode::BAD_REQUEST,
            "Post request could not be processed",
            message,
        ),
        AdminPostError::Invalid(errors) => HttpError::new(
            source,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Post submission is invalid",
            errors.to_string(),
        ),
        AdminPostError::Domain(domain) => HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &domain,
        ),
        AdminPostError::Repo(repo) => repo_error_to_http(source, repo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::repos::RepoError;
    use crate::domain::posts::{PostField, PostFieldErrors, TITLE_REQUIRED};

    const SOURCE: &str = "tests";

    #[test]
    fn maps_each_failure_to_its_status() {
        let cases = [
            (
                AdminPostError::MissingParameter("slug"),
                StatusCode::BAD_REQUEST,
            ),
            (
                AdminPostError::NotFound {
                    slug: "ghost".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (AdminPostError::shape("bad"), StatusCode::BAD_REQUEST),
            (
                AdminPostError::Invalid(PostFieldErrors::only(PostField::Title, TITLE_REQUIRED)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AdminPostError::Repo(RepoError::Persistence("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AdminPostError::Repo(RepoError::Timeout),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(admin_post_error(SOURCE, err).status(), status);
        }
    }
}

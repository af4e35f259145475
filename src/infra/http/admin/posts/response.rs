use axum::{
    Json,
    http::{HeaderMap, StatusCode, header::ACCEPT},
    response::{IntoResponse, Response},
};

use crate::application::error::ErrorReport;
use crate::domain::posts::PostFieldErrors;
use crate::presentation::{
    admin::views::{AdminLayout, AdminPostEditorTemplate, AdminPostEditorView},
    views::render_template_response,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ResponseFormat {
    Html,
    Json,
}

impl ResponseFormat {
    /// JSON only when the client lists it ahead of HTML.
    pub(super) fn negotiate(headers: &HeaderMap) -> Self {
        let Some(accept) = headers.get(ACCEPT).and_then(|value| value.to_str().ok()) else {
            return Self::Html;
        };

        for media in accept.split(',') {
            let essence = media.split(';').next().unwrap_or("").trim();
            match essence {
                "application/json" => return Self::Json,
                "text/html" | "application/xhtml+xml" => return Self::Html,
                _ => {}
            }
        }

        Self::Html
    }
}

/// Re-render a rejected form with its field errors, or return the errors as
/// JSON, with `422 Unprocessable Entity`.
pub(super) fn respond_with_invalid_post(
    source: &'static str,
    format: ResponseFormat,
    view: AdminLayout<AdminPostEditorView>,
    errors: &PostFieldErrors,
) -> Response {
    let status = StatusCode::UNPROCESSABLE_ENTITY;
    let mut response = match format {
        ResponseFormat::Json => (status, Json(errors)).into_response(),
        ResponseFormat::Html => render_template_response(AdminPostEditorTemplate { view }, status),
    };

    if response.status() == status {
        ErrorReport::from_message(source, status, errors.to_string()).attach(&mut response);
    }
    response
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn negotiates_json_only_when_preferred() {
        assert_eq!(ResponseFormat::negotiate(&HeaderMap::new()), ResponseFormat::Html);
        assert_eq!(
            ResponseFormat::negotiate(&accept("application/json")),
            ResponseFormat::Json
        );
        assert_eq!(
            ResponseFormat::negotiate(&accept("application/json; charset=utf-8, text/html")),
            ResponseFormat::Json
        );
        assert_eq!(
            ResponseFormat::negotiate(&accept("text/html,application/xhtml+xml,application/json;q=0.9")),
            ResponseFormat::Html
        );
        assert_eq!(ResponseFormat::negotiate(&accept("*/*")), ResponseFormat::Html);
    }
}

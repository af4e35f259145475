//! The post entity and the field rules enforced by the admin forms.
//!
//! A field is present when it is non-empty. Values are passed on exactly as
//! submitted; surrounding whitespace in a slug is a format error at creation
//! time.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Slugs that collide with fixed admin routes.
pub const RESERVED_SLUGS: &[&str] = &["new"];

pub const TITLE_REQUIRED: &str = "Title is required";
pub const SLUG_REQUIRED: &str = "Slug is required";
pub const MARKDOWN_REQUIRED: &str = "Markdown is required";
pub const SLUG_NOT_ALPHANUMERIC: &str = "Slug must contain only letters and digits";
pub const SLUG_RESERVED: &str = "Slug is reserved";
pub const SLUG_TAKEN: &str = "A post with this slug already exists";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub markdown: String,
}

/// A validated creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub slug: Slug,
    pub title: String,
    pub markdown: String,
}

/// The mutable part of a post. The slug is never part of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdate {
    pub title: String,
    pub markdown: String,
}

/// A validated edit request, carrying the slug it was submitted against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEdit {
    pub slug: String,
    pub update: PostUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("slug contains characters outside [A-Za-z0-9]")]
    NotAlphanumeric,
    #[error("slug is reserved")]
    Reserved,
}

impl SlugError {
    /// Message shown next to the slug input.
    pub fn message(self) -> &'static str {
        match self {
            SlugError::Empty => SLUG_REQUIRED,
            SlugError::NotAlphanumeric => SLUG_NOT_ALPHANUMERIC,
            SlugError::Reserved => SLUG_RESERVED,
        }
    }
}

impl Slug {
    /// Parse a slug for a new post: ASCII letters and digits only.
    pub fn parse(raw: &str) -> Result<Self, SlugError> {
        if raw.is_empty() {
            return Err(SlugError::Empty);
        }

        if !raw.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(SlugError::NotAlphanumeric);
        }

        if RESERVED_SLUGS.contains(&raw) {
            return Err(SlugError::Reserved);
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Title,
    Slug,
    Markdown,
}

impl PostField {
    /// Order in which erroneous inputs receive focus.
    pub const FOCUS_ORDER: [PostField; 3] = [PostField::Title, PostField::Slug, PostField::Markdown];

    pub fn as_str(self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Slug => "slug",
            PostField::Markdown => "markdown",
        }
    }
}

/// Per-field error messages; `None` means the field is fine.
///
/// Serializes to `{"title": ..., "slug": ..., "markdown": ...}` with `null`
/// for fields without an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostFieldErrors {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub markdown: Option<String>,
}

impl PostFieldErrors {
    pub fn only(field: PostField, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.set(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.markdown.is_none()
    }

    pub fn get(&self, field: PostField) -> Option<&str> {
        match field {
            PostField::Title => self.title.as_deref(),
            PostField::Slug => self.slug.as_deref(),
            PostField::Markdown => self.markdown.as_deref(),
        }
    }

    pub fn set(&mut self, field: PostField, message: impl Into<String>) {
        let slot = match field {
            PostField::Title => &mut self.title,
            PostField::Slug => &mut self.slug,
            PostField::Markdown => &mut self.markdown,
        };
        *slot = Some(message.into());
    }

    /// First field with an error, in focus order.
    pub fn first_field(&self) -> Option<PostField> {
        PostField::FOCUS_ORDER
            .into_iter()
            .find(|field| self.get(*field).is_some())
    }

    pub fn count(&self) -> usize {
        PostField::FOCUS_ORDER
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .count()
    }
}

impl fmt::Display for PostFieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in PostField::FOCUS_ORDER {
            if let Some(message) = self.get(field) {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {message}", field.as_str())?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Raw form values as submitted. Absent and empty are both treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostSubmission {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub markdown: Option<String>,
}

impl PostSubmission {
    /// Validate a creation request. Every field is checked; errors are not
    /// short-circuited.
    pub fn validate_new(&self) -> Result<NewPost, PostFieldErrors> {
        let mut errors = PostFieldErrors::default();

        let title = required(&self.title, PostField::Title, TITLE_REQUIRED, &mut errors);
        let slug = match required(&self.slug, PostField::Slug, SLUG_REQUIRED, &mut errors) {
            Some(raw) => match Slug::parse(raw) {
                Ok(slug) => Some(slug),
                Err(err) => {
                    errors.set(PostField::Slug, err.message());
                    None
                }
            },
            None => None,
        };
        let markdown = required(
            &self.markdown,
            PostField::Markdown,
            MARKDOWN_REQUIRED,
            &mut errors,
        );

        match (title, slug, markdown) {
            (Some(title), Some(slug), Some(markdown)) if errors.is_empty() => Ok(NewPost {
                slug,
                title: title.to_string(),
                markdown: markdown.to_string(),
            }),
            _ => Err(errors),
        }
    }

    /// Validate an edit request. The slug is only checked for presence since
    /// it is not user-editable.
    pub fn validate_edit(&self) -> Result<PostEdit, PostFieldErrors> {
        let mut errors = PostFieldErrors::default();

        let title = required(&self.title, PostField::Title, TITLE_REQUIRED, &mut errors);
        let slug = required(&self.slug, PostField::Slug, SLUG_REQUIRED, &mut errors);
        let markdown = required(
            &self.markdown,
            PostField::Markdown,
            MARKDOWN_REQUIRED,
            &mut errors,
        );

        match (title, slug, markdown) {
            (Some(title), Some(slug), Some(markdown)) => Ok(PostEdit {
                slug: slug.to_string(),
                update: PostUpdate {
                    title: title.to_string(),
                    markdown: markdown.to_string(),
                },
            }),
            _ => Err(errors),
        }
    }
}

fn required<'a>(
    value: &'a Option<String>,
    field: PostField,
    message: &'static str,
    errors: &mut PostFieldErrors,
) -> Option<&'a str> {
    let present = value.as_deref().filter(|v| !v.is_empty());
    if present.is_none() {
        errors.set(field, message);
    }
    present
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(title: Option<&str>, slug: Option<&str>, markdown: Option<&str>) -> PostSubmission {
        PostSubmission {
            title: title.map(str::to_string),
            slug: slug.map(str::to_string),
            markdown: markdown.map(str::to_string),
        }
    }

    #[test]
    fn missing_fields_each_get_a_message() {
        let errors = submission(None, Some("abc"), None)
            .validate_new()
            .expect_err("should fail");

        assert_eq!(errors.title.as_deref(), Some(TITLE_REQUIRED));
        assert_eq!(errors.slug, None);
        assert_eq!(errors.markdown.as_deref(), Some(MARKDOWN_REQUIRED));
        assert_eq!(errors.count(), 2);
    }

    #[test]
    fn empty_values_count_as_missing() {
        let errors = submission(Some(""), Some(""), Some(""))
            .validate_new()
            .expect_err("should fail");

        assert_eq!(errors.title.as_deref(), Some(TITLE_REQUIRED));
        assert_eq!(errors.slug.as_deref(), Some(SLUG_REQUIRED));
        assert_eq!(errors.markdown.as_deref(), Some(MARKDOWN_REQUIRED));
    }

    #[test]
    fn whitespace_values_are_present() {
        let edit = submission(Some("   "), Some("abc"), Some("\n\t"))
            .validate_edit()
            .expect("whitespace is not missing");
        assert_eq!(edit.update.title, "   ");
        assert_eq!(edit.update.markdown, "\n\t");

        let errors = submission(Some("   "), Some("   "), Some("\n\t"))
            .validate_new()
            .expect_err("bad slug");
        assert_eq!(errors, PostFieldErrors::only(PostField::Slug, SLUG_NOT_ALPHANUMERIC));
    }

    #[test]
    fn non_alphanumeric_slugs_are_rejected() {
        for slug in ["hello-world", "hello world", " hello", "abc!", "héllo", "日本", "a_b", "x.y"] {
            let errors = submission(Some("Title"), Some(slug), Some("body"))
                .validate_new()
                .expect_err(slug);
            assert_eq!(errors.slug.as_deref(), Some(SLUG_NOT_ALPHANUMERIC), "{slug}");
            assert_eq!(errors.title, None);
            assert_eq!(errors.markdown, None);
        }
    }

    #[test]
    fn format_error_combines_with_missing_fields() {
        let errors = submission(None, Some("bad slug"), None)
            .validate_new()
            .expect_err("should fail");

        assert_eq!(errors.count(), 3);
        assert_eq!(errors.slug.as_deref(), Some(SLUG_NOT_ALPHANUMERIC));
    }

    #[test]
    fn reserved_slug_is_rejected() {
        assert_eq!(Slug::parse("new"), Err(SlugError::Reserved));
        assert!(Slug::parse("News").is_ok());
    }

    #[test]
    fn valid_creation_keeps_values_verbatim() {
        let post = submission(Some("  Hello "), Some("hello123"), Some("# Hi\n"))
            .validate_new()
            .expect("valid");

        assert_eq!(post.slug.as_str(), "hello123");
        assert_eq!(post.title, "  Hello ");
        assert_eq!(post.markdown, "# Hi\n");
    }

    #[test]
    fn edit_checks_slug_presence_only() {
        let edit = submission(Some("New"), Some("legacy-slug"), Some("body"))
            .validate_edit()
            .expect("valid");

        assert_eq!(edit.slug, "legacy-slug");
        assert_eq!(
            edit.update,
            PostUpdate {
                title: "New".into(),
                markdown: "body".into(),
            }
        );

        let errors = submission(Some("New"), None, Some("body"))
            .validate_edit()
            .expect_err("missing slug");
        assert_eq!(errors, PostFieldErrors::only(PostField::Slug, SLUG_REQUIRED));

        let edit = submission(Some(" New "), Some("abc"), Some("body"))
            .validate_edit()
            .expect("valid");
        assert_eq!(edit.update.title, " New ");
    }

    #[test]
    fn focus_follows_title_slug_markdown() {
        let mut errors = PostFieldErrors::only(PostField::Markdown, MARKDOWN_REQUIRED);
        assert_eq!(errors.first_field(), Some(PostField::Markdown));

        errors.set(PostField::Slug, SLUG_REQUIRED);
        assert_eq!(errors.first_field(), Some(PostField::Slug));

        errors.set(PostField::Title, TITLE_REQUIRED);
        assert_eq!(errors.first_field(), Some(PostField::Title));

        assert_eq!(PostFieldErrors::default().first_field(), None);
    }

    #[test]
    fn errors_display_in_focus_order() {
        let mut errors = PostFieldErrors::only(PostField::Markdown, MARKDOWN_REQUIRED);
        errors.set(PostField::Title, TITLE_REQUIRED);
        assert_eq!(
            errors.to_string(),
            "title: Title is required; markdown: Markdown is required"
        );
    }
}

use askama::Template;

use crate::domain::posts::{Post, PostField, PostFieldErrors, PostSubmission};
use crate::domain::submission::Submission;

pub const ADMIN_POSTS_HREF: &str = "/posts/admin";
pub const ADMIN_NEW_POST_HREF: &str = "/posts/admin/new";

pub fn edit_post_href(slug: &str) -> String {
    format!("{ADMIN_POSTS_HREF}/{slug}")
}

#[derive(Clone)]
pub struct AdminChrome {
    pub site_title: String,
    pub page_title: String,
    pub home_href: &'static str,
}

impl AdminChrome {
    pub fn new(site_title: impl Into<String>, page_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
            page_title: page_title.into(),
            home_href: ADMIN_POSTS_HREF,
        }
    }
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub asset_version: String,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, content: T) -> Self {
        Self {
            chrome,
            asset_version: asset_version(),
            content,
        }
    }
}

fn asset_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Clone)]
pub struct AdminPostRowView {
    pub title: String,
    pub slug: String,
    pub edit_href: String,
}

#[derive(Clone)]
pub struct AdminPostListView {
    pub heading: String,
    pub posts: Vec<AdminPostRowView>,
    pub new_post_href: &'static str,
    pub empty_message: String,
}

impl AdminPostListView {
    pub fn from_posts(posts: &[Post]) -> Self {
        Self {
            heading: "Posts".into(),
            posts: posts
                .iter()
                .map(|post| AdminPostRowView {
                    title: post.title.clone(),
                    slug: post.slug.clone(),
                    edit_href: edit_post_href(&post.slug),
                })
                .collect(),
            new_post_href: ADMIN_NEW_POST_HREF,
            empty_message: "No posts yet.".into(),
        }
    }

    pub fn has_posts(&self) -> bool {
        !self.posts.is_empty()
    }
}

#[derive(Template)]
#[template(path = "admin/posts.html")]
pub struct AdminPostsTemplate {
    pub view: AdminLayout<AdminPostListView>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
    pub autofocus: bool,
}

impl AdminFieldView {
    fn new(field: PostField, label: &'static str, value: Option<&str>, submission: &Submission) -> Self {
        let errors = submission.errors();
        Self {
            name: field.as_str(),
            label,
            value: value.unwrap_or_default().to_string(),
            error: errors.and_then(|e| e.get(field)).map(str::to_string),
            autofocus: errors.and_then(PostFieldErrors::first_field) == Some(field),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_id(&self) -> String {
        format!("{}-error", self.name)
    }
}

/// Submit control. Disabled and relabelled while the write is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminSubmitView {
    pub idle_label: &'static str,
    pub pending_label: &'static str,
    pub pending: bool,
}

impl AdminSubmitView {
    pub fn label(&self) -> &'static str {
        if self.pending {
            self.pending_label
        } else {
            self.idle_label
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminPendingLinkView {
    pub href: &'static str,
    pub label: &'static str,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct AdminPostEditorView {
    pub heading: String,
    pub form_action: String,
    pub title: AdminFieldView,
    pub slug: AdminFieldView,
    pub markdown: AdminFieldView,
    pub slug_editable: bool,
    pub submit: AdminSubmitView,
    /// Creator only: shown in place of the form while a valid creation is in flight.
    pub pending_link: Option<AdminPendingLinkView>,
    pub error_count: usize,
}

impl AdminPostEditorView {
    pub fn for_new(input: &PostSubmission, submission: &Submission) -> Self {
        let pending = submission.is_pending();
        Self {
            heading: "New Post".into(),
            form_action: ADMIN_NEW_POST_HREF.into(),
            title: AdminFieldView::new(PostField::Title, "Post Title", input.title.as_deref(), submission),
            slug: AdminFieldView::new(PostField::Slug, "Post Slug", input.slug.as_deref(), submission),
            markdown: AdminFieldView::new(
                PostField::Markdown,
                "Markdown",
                input.markdown.as_deref(),
                submission,
            ),
            slug_editable: true,
            submit: AdminSubmitView {
                idle_label: "Create Post",
                pending_label: "Creating...",
                pending,
            },
            pending_link: Some(AdminPendingLinkView {
                href: ADMIN_NEW_POST_HREF,
                label: "Create a New Post",
                visible: pending && !submission.has_errors(),
            }),
            error_count: error_count(submission),
        }
    }

    pub fn for_post(post: &Post) -> Self {
        let input = PostSubmission {
            title: Some(post.title.clone()),
            slug: Some(post.slug.clone()),
            markdown: Some(post.markdown.clone()),
        };
        Self::for_edit(&post.slug, &input, &Submission::new())
    }

    /// Editor form for `route_slug`. The hidden slug always carries the route
    /// slug forward, whatever was submitted.
    pub fn for_edit(route_slug: &str, input: &PostSubmission, submission: &Submission) -> Self {
        Self {
            heading: format!("Edit {route_slug}"),
            form_action: edit_post_href(route_slug),
            title: AdminFieldView::new(PostField::Title, "Post Title", input.title.as_deref(), submission),
            slug: AdminFieldView::new(PostField::Slug, "Post Slug", Some(route_slug), submission),
            markdown: AdminFieldView::new(
                PostField::Markdown,
                "Markdown",
                input.markdown.as_deref(),
                submission,
            ),
            slug_editable: false,
            submit: AdminSubmitView {
                idle_label: "Edit Post",
                pending_label: "Updating...",
                pending: submission.is_pending(),
            },
            pending_link: None,
            error_count: error_count(submission),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn pending_link(&self) -> Option<&AdminPendingLinkView> {
        self.pending_link.as_ref()
    }

    pub fn form_hidden(&self) -> bool {
        self.pending_link.as_ref().is_some_and(|link| link.visible)
    }
}

fn error_count(submission: &Submission) -> usize {
    submission.errors().map(PostFieldErrors::count).unwrap_or(0)
}

#[derive(Template)]
#[template(path = "admin/post_editor.html")]
pub struct AdminPostEditorTemplate {
    pub view: AdminLayout<AdminPostEditorView>,
}

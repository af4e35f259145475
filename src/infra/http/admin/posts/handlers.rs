//! Listing, creator and editor handlers for posts.

use axum::{
    extract::{Form, Path, State, rejection::FormRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    application::admin::posts::AdminPostError,
    domain::{posts::PostSubmission, submission::Submission},
    infra::http::admin::AdminState,
    presentation::{admin::views as admin_views, views::render_template_response},
};

use super::errors::admin_post_error;
use super::forms::{AdminPostForm, form_rejection};
use super::response::{ResponseFormat, respond_with_invalid_post};

const NEW_POST_TITLE: &str = "New Post";

pub(crate) async fn admin_posts(State(state): State<AdminState>) -> Response {
    let posts = match state.posts.list_posts().await {
        Ok(posts) => posts,
        Err(err) => return admin_post_error("infra::http::admin_posts", err).into_response(),
    };

    let content = admin_views::AdminPostListView::from_posts(&posts);
    let view = admin_views::AdminLayout::new(state.chrome("Posts"), content);
    render_template_response(admin_views::AdminPostsTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_post_new(State(state): State<AdminState>) -> Response {
    let content =
        admin_views::AdminPostEditorView::for_new(&PostSubmission::default(), &Submission::new());
    let view = admin_views::AdminLayout::new(state.chrome(NEW_POST_TITLE), content);
    render_template_response(admin_views::AdminPostEditorTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_post_create(
    State(state): State<AdminState>,
    headers: HeaderMap,
    form: Result<Form<AdminPostForm>, FormRejection>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_post_create";

    let input = match form {
        Ok(Form(form)) => form.into_submission(),
        Err(rejection) => return form_rejection(SOURCE, rejection).into_response(),
    };

    let mut submission = Submission::new();
    match state.posts.create_post(&input, &mut submission).await {
        Ok(_) => Redirect::to(admin_views::ADMIN_POSTS_HREF).into_response(),
        Err(AdminPostError::Invalid(errors)) => {
            let content = admin_views::AdminPostEditorView::for_new(&input, &submission);
            let view = admin_views::AdminLayout::new(state.chrome(NEW_POST_TITLE), content);
            respond_with_invalid_post(SOURCE, ResponseFormat::negotiate(&headers), view, &errors)
        }
        Err(err) => admin_post_error(SOURCE, err).into_response(),
    }
}

pub(crate) async fn admin_post_edit(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
) -> Response {
    let post = match state.posts.load_post(&slug).await {
        Ok(post) => post,
        Err(err) => return admin_post_error("infra::http::admin_post_edit", err).into_response(),
    };

    let content = admin_views::AdminPostEditorView::for_post(&post);
    let view = admin_views::AdminLayout::new(state.chrome(edit_title(&slug)), content);
    render_template_response(admin_views::AdminPostEditorTemplate { view }, StatusCode::OK)
}

pub(crate) async fn admin_post_update(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    form: Result<Form<AdminPostForm>, FormRejection>,
) -> Response {
    const SOURCE: &str = "infra::http::admin_post_update";

    let input = match form {
        Ok(Form(form)) => form.into_submission(),
        Err(rejection) => return form_rejection(SOURCE, rejection).into_response(),
    };

    let mut submission = Submission::new();
    match state.posts.update_post(&slug, &input, &mut submission).await {
        Ok(_) => Redirect::to(admin_views::ADMIN_POSTS_HREF).into_response(),
        Err(AdminPostError::Invalid(errors)) => {
            let content = admin_views::AdminPostEditorView::for_edit(&slug, &input, &submission);
            let view = admin_views::AdminLayout::new(state.chrome(edit_title(&slug)), content);
            respond_with_invalid_post(SOURCE, ResponseFormat::negotiate(&headers), view, &errors)
        }
        Err(err) => admin_post_error(SOURCE, err).into_response(),
    }
}

fn edit_title(slug: &str) -> String {
    format!("Edit {slug}")
}

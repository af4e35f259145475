use metrics::counter;
use tracing::info;

use crate::application::repos::RepoError;
use crate::domain::posts::{Post, PostField, PostFieldErrors, PostSubmission, SLUG_TAKEN};
use crate::domain::submission::Submission;

use super::service::AdminPostService;
use super::types::{AdminPostError, PostForm};

impl AdminPostService {
    /// Validate and persist a new post.
    ///
    /// `submission` is moved to `Submitting` for the duration of the write and
    /// settles as `Redirected` on success or `Failed` otherwise.
    pub async fn create_post(
        &self,
        input: &PostSubmission,
        submission: &mut Submission,
    ) -> Result<Post, AdminPostError> {
        submission.begin()?;
        self.simulate_latency().await;

        let new_post = match input.validate_new() {
            Ok(new_post) => new_post,
            Err(errors) => return Err(reject(submission, PostForm::Create, errors)?),
        };

        let post = match self.store.create(new_post).await {
            Ok(post) => post,
            Err(RepoError::Duplicate { .. }) => {
                let errors = PostFieldErrors::only(PostField::Slug, SLUG_TAKEN);
                return Err(reject(submission, PostForm::Create, errors)?);
            }
            Err(err) => {
                submission.fail(PostFieldErrors::default())?;
                return Err(err.into());
            }
        };

        submission.redirect()?;
        counter!("postdesk_posts_created_total").increment(1);
        info!(
            target = "postdesk::admin::posts",
            slug = %post.slug,
            "created post"
        );

        Ok(post)
    }

    /// Validate and persist an edit of the post addressed by `route_slug`.
    ///
    /// The slug in the form is carried forward from the page and must match
    /// the route; it is never written.
    pub async fn update_post(
        &self,
        route_slug: &str,
        input: &PostSubmission,
        submission: &mut Submission,
    ) -> Result<Post, AdminPostError> {
        if route_slug.trim().is_empty() {
            return Err(AdminPostError::MissingParameter("slug"));
        }

        submission.begin()?;
        self.simulate_latency().await;

        let edit = match input.validate_edit() {
            Ok(edit) => edit,
            Err(errors) => return Err(reject(submission, PostForm::Edit, errors)?),
        };

        if edit.slug != route_slug {
            submission.fail(PostFieldErrors::default())?;
            return Err(AdminPostError::shape(format!(
                "form slug `{}` does not match route slug `{route_slug}`",
                edit.slug
            )));
        }

        let post = match self.store.update(route_slug, edit.update).await {
            Ok(post) => post,
            Err(RepoError::NotFound) => {
                submission.fail(PostFieldErrors::default())?;
                return Err(AdminPostError::NotFound {
                    slug: route_slug.to_string(),
                });
            }
            Err(err) => {
                submission.fail(PostFieldErrors::default())?;
                return Err(err.into());
            }
        };

        submission.redirect()?;
        counter!("postdesk_posts_updated_total").increment(1);
        info!(
            target = "postdesk::admin::posts",
            slug = %post.slug,
            "updated post"
        );

        Ok(post)
    }
}

fn reject(
    submission: &mut Submission,
    form: PostForm,
    errors: PostFieldErrors,
) -> Result<AdminPostError, AdminPostError> {
    counter!("postdesk_post_validation_failures_total", "form" => form.as_str()).increment(1);
    submission.fail(errors.clone())?;
    Ok(AdminPostError::Invalid(errors))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::domain::posts::{NewPost, PostUpdate, SLUG_NOT_ALPHANUMERIC, Slug, TITLE_REQUIRED};
    use crate::domain::submission::SubmissionPhase;
    use crate::infra::memory::InMemoryPostStore;

    fn input(title: &str, slug: &str, markdown: &str) -> PostSubmission {
        PostSubmission {
            title: Some(title.into()),
            slug: Some(slug.into()),
            markdown: Some(markdown.into()),
        }
    }

    fn service() -> (Arc<InMemoryPostStore>, AdminPostService) {
        let store = Arc::new(InMemoryPostStore::new());
        let service = AdminPostService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn create_post_persists_and_redirects() {
        let (store, service) = service();
        let mut submission = Submission::new();

        let post = service
            .create_post(&input("Hello", "hello123", "# Hi"), &mut submission)
            .await
            .expect("created");

        assert_eq!(post.slug, "hello123");
        assert_eq!(submission.phase(), SubmissionPhase::Redirected);
        assert_eq!(store.get_sync("hello123"), Some(post));
    }

    #[tokio::test]
    async fn create_post_rejects_bad_slug_without_writing() {
        let (store, service) = service();
        let mut submission = Submission::new();

        let err = service
            .create_post(&input("Hello", "hello world", "# Hi"), &mut submission)
            .await
            .expect_err("invalid");

        match err {
            AdminPostError::Invalid(errors) => {
                assert_eq!(errors.slug.as_deref(), Some(SLUG_NOT_ALPHANUMERIC));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(submission.phase(), SubmissionPhase::Failed);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn duplicate_slug_is_an_inline_error() {
        let (store, service) = service();
        store
            .insert(NewPost {
                slug: Slug::parse("taken").expect("slug"),
                title: "Existing".into(),
                markdown: "body".into(),
            })
            .expect("seed");

        let mut submission = Submission::new();
        let err = service
            .create_post(&input("Other", "taken", "text"), &mut submission)
            .await
            .expect_err("duplicate");

        match err {
            AdminPostError::Invalid(errors) => {
                assert_eq!(errors, PostFieldErrors::only(PostField::Slug, SLUG_TAKEN));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.get_sync("taken").map(|p| p.title), Some("Existing".into()));
    }

    #[tokio::test]
    async fn update_post_keeps_slug() {
        let (store, service) = service();
        store
            .insert(NewPost {
                slug: Slug::parse("abc").expect("slug"),
                title: "Old".into(),
                markdown: "old body".into(),
            })
            .expect("seed");

        let mut submission = Submission::new();
        let post = service
            .update_post("abc", &input("New", "abc", "body"), &mut submission)
            .await
            .expect("updated");

        assert_eq!(post.slug, "abc");
        assert_eq!(
            store.get_sync("abc").map(|p| PostUpdate {
                title: p.title,
                markdown: p.markdown,
            }),
            Some(PostUpdate {
                title: "New".into(),
                markdown: "body".into(),
            })
        );
        assert_eq!(submission.phase(), SubmissionPhase::Redirected);
    }

    #[tokio::test]
    async fn update_post_rejects_mismatched_hidden_slug() {
        let (store, service) = service();
        store
            .insert(NewPost {
                slug: Slug::parse("abc").expect("slug"),
                title: "Old".into(),
                markdown: "old".into(),
            })
            .expect("seed");

        let mut submission = Submission::new();
        let err = service
            .update_post("abc", &input("New", "xyz", "body"), &mut submission)
            .await
            .expect_err("mismatch");

        assert!(matches!(err, AdminPostError::Shape(_)));
        assert_eq!(store.get_sync("abc").map(|p| p.title), Some("Old".into()));
        assert!(store.get_sync("xyz").is_none());
    }

    #[tokio::test]
    async fn update_post_reports_missing_fields() {
        let (_store, service) = service();
        let mut submission = Submission::new();
        let input = PostSubmission {
            title: None,
            slug: Some("abc".into()),
            markdown: Some("body".into()),
        };

        let err = service
            .update_post("abc", &input, &mut submission)
            .await
            .expect_err("invalid");

        match err {
            AdminPostError::Invalid(errors) => {
                assert_eq!(errors.title.as_deref(), Some(TITLE_REQUIRED));
                assert_eq!(errors.count(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(submission.has_errors());
    }

    #[tokio::test]
    async fn update_post_of_unknown_slug_is_not_found() {
        let (_store, service) = service();
        let mut submission = Submission::new();

        let err = service
            .update_post("ghost", &input("New", "ghost", "body"), &mut submission)
            .await
            .expect_err("not found");

        assert!(matches!(err, AdminPostError::NotFound { .. }));
        assert!(!submission.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_latency_delays_writes() {
        let store = Arc::new(InMemoryPostStore::new());
        let service =
            AdminPostService::new(store.clone()).with_simulated_latency(Duration::from_secs(1));

        let started = tokio::time::Instant::now();
        let mut submission = Submission::new();
        service
            .create_post(&input("Hello", "hello", "body"), &mut submission)
            .await
            .expect("created");

        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}

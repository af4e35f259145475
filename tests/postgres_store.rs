//! Exercises the PostgreSQL adapter. Needs `DATABASE_URL`; run with
//! `cargo test -- --ignored`.

use postdesk::application::repos::{PostStore, RepoError};
use postdesk::domain::posts::{NewPost, PostUpdate, Slug};
use postdesk::infra::db::PostgresRepositories;
use sqlx::PgPool;

fn new_post(slug: &str, title: &str) -> NewPost {
    NewPost {
        slug: Slug::parse(slug).expect("slug"),
        title: title.into(),
        markdown: "body".into(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_get_update_roundtrip(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);

    let created = repos.create(new_post("abc", "First")).await.expect("create");
    assert_eq!(repos.get("abc").await.expect("get"), Some(created));

    let updated = repos
        .update(
            "abc",
            PostUpdate {
                title: "Renamed".into(),
                markdown: "new body".into(),
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.slug, "abc");
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.markdown, "new body");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_and_missing_slugs_map_to_repo_errors(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    repos.create(new_post("abc", "First")).await.expect("create");

    let duplicate = repos
        .create(new_post("abc", "Second"))
        .await
        .expect_err("duplicate");
    assert!(matches!(duplicate, RepoError::Duplicate { .. }));

    let missing = repos
        .update(
            "ghost",
            PostUpdate {
                title: "t".into(),
                markdown: "m".into(),
            },
        )
        .await
        .expect_err("missing");
    assert!(matches!(missing, RepoError::NotFound));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn list_is_ordered_by_slug(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    repos.create(new_post("zeta", "Z")).await.expect("create");
    repos.create(new_post("alpha", "A")).await.expect("create");

    let slugs: Vec<String> = repos
        .list()
        .await
        .expect("list")
        .into_iter()
        .map(|post| post.slug)
        .collect();
    assert_eq!(slugs, vec!["alpha".to_string(), "zeta".to_string()]);
}

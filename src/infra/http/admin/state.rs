use std::sync::Arc;

use crate::application::admin::posts::AdminPostService;
use crate::infra::db::PostgresRepositories;
use crate::presentation::admin::views::AdminChrome;

#[derive(Clone)]
pub struct AdminState {
    pub posts: Arc<AdminPostService>,
    /// Present when posts are kept in PostgreSQL.
    pub db: Option<Arc<PostgresRepositories>>,
    pub site_title: Arc<str>,
}

impl AdminState {
    pub fn new(posts: Arc<AdminPostService>, site_title: impl Into<Arc<str>>) -> Self {
        Self {
            posts,
            db: None,
            site_title: site_title.into(),
        }
    }

    pub fn with_database(mut self, db: Arc<PostgresRepositories>) -> Self {
        self.db = Some(db);
        self
    }

    pub(crate) fn chrome(&self, page_title: impl Into<String>) -> AdminChrome {
        AdminChrome::new(&*self.site_title, page_title)
    }
}

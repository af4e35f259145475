mod errors;
mod forms;
mod handlers;
mod response;

pub(super) use handlers::{
    admin_post_create, admin_post_edit, admin_post_new, admin_post_update, admin_posts,
};

use crate::modules::posts::controller::{
    admin_list_posts, create_post, delete_post, get_post, list_posts, update_post,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

/// Routes nested under `/api/public/posts`.
pub fn init_public_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/{slug}", get(get_post))
}

/// Routes nested under `/api/admin/posts` (admin only).
pub fn init_admin_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_list_posts).post(create_post))
        .route("/{id}", put(update_post).delete(delete_post))
}

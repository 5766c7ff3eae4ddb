use crate::modules::announcements::controller::{
    create_announcement, delete_announcement, get_announcement, list_announcements,
    update_announcement,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Routes nested under `/api/public/announcements`.
pub fn init_public_announcements_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_announcements))
        .route("/{id}", get(get_announcement))
}

/// Routes nested under `/api/admin/announcements` (admin only).
pub fn init_admin_announcements_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_announcement))
        .route("/{id}", put(update_announcement).delete(delete_announcement))
}

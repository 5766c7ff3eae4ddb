use crate::modules::users::controller::{
    change_password, get_profile, list_users, update_profile, update_user_role,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Routes nested under `/api/user` (any authenticated identity).
pub fn init_user_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile/change-password", post(change_password))
}

/// Routes nested under `/api/admin/users` (admin only).
pub fn init_admin_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}/role", put(update_user_role))
}

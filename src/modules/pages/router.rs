use crate::modules::pages::controller::{
    admin_dashboard, announcements, blog, catalog, course_detail, home, not_found, signin,
    signup, student_dashboard, teacher_dashboard,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Page routes. The access middleware is layered over this router in
/// `crate::router`; nothing here performs its own role checks.
pub fn init_pages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/courses", get(catalog))
        .route("/courses/{id}", get(course_detail))
        .route("/blog", get(blog))
        .route("/announcements", get(announcements))
        .route("/signin", get(signin))
        .route("/signup", get(signup))
        .route("/dashboard", get(student_dashboard))
        .route("/teacher", get(teacher_dashboard))
        .route("/admin", get(admin_dashboard))
        .fallback(not_found)
}

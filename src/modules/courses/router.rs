use crate::modules::courses::controller::{
    admin_list_courses, create_course, create_lesson, delete_course, delete_lesson, enroll,
    get_course, list_courses, my_course_detail, my_courses, teacher_courses, update_course,
    update_lesson,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Routes nested under `/api/public/courses`.
pub fn init_public_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses))
        .route("/{id}", get(get_course))
}

/// Routes nested under `/api/student` (students only).
pub fn init_student_courses_router() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(enroll))
        .route("/courses", get(my_courses))
        .route("/courses/{id}", get(my_course_detail))
}

/// Routes nested under `/api/teacher` (teacher or admin).
pub fn init_teacher_courses_router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(teacher_courses))
        .route("/courses/{course_id}/lessons", post(create_lesson))
        .route(
            "/courses/{course_id}/lessons/{lesson_id}",
            put(update_lesson).delete(delete_lesson),
        )
}

/// Routes nested under `/api/admin/courses` (admin only).
pub fn init_admin_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_list_courses).post(create_course))
        .route("/{id}", put(update_course).delete(delete_course))
}

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::courses::model::{
    Course, CourseListParams, CourseWithLessons, CreateCourseDto, CreateLessonDto, EnrollDto,
    Lesson, UpdateCourseDto, UpdateLessonDto,
};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::ListPage;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/public/courses",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("search" = Option<String>, Query, description = "Match against title and description")
    ),
    responses((status = 200, description = "Published courses")),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> Result<Json<ListPage<Course>>, AppError> {
    let (courses, total) = CourseService::list_published(&state.db, &params).await?;
    Ok(Json(ListPage::new(courses, total, &params.list)))
}

#[utoipa::path(
    get,
    path = "/api/public/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course detail", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_published_course(&state.db, id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    post,
    path = "/api/student/enrollments",
    request_body = EnrollDto,
    responses(
        (status = 200, description = "Enrolled"),
        (status = 400, description = "Already enrolled", body = ErrorResponse),
        (status = 403, description = "Forbidden - Students only", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn enroll(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<EnrollDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    CourseService::enroll(&state.db, auth_user.user_id()?, dto.course_id).await?;
    Ok(Json(json!({"message": "Enrolled successfully"})))
}

#[utoipa::path(
    get,
    path = "/api/student/courses",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("search" = Option<String>, Query, description = "Match against title and description")
    ),
    responses((status = 200, description = "Enrolled courses")),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn my_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<CourseListParams>,
) -> Result<Json<ListPage<Course>>, AppError> {
    let (courses, total) =
        CourseService::list_enrolled(&state.db, auth_user.user_id()?, &params).await?;
    Ok(Json(ListPage::new(courses, total, &params.list)))
}

#[utoipa::path(
    get,
    path = "/api/student/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course with lessons", body = CourseWithLessons),
        (status = 404, description = "Course not found or not enrolled", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn my_course_detail(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseWithLessons>, AppError> {
    let detail = CourseService::get_enrolled_course(&state.db, auth_user.user_id()?, id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    get,
    path = "/api/teacher/courses",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("search" = Option<String>, Query, description = "Match against title and description")
    ),
    responses((status = 200, description = "Courses taught by the caller")),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn teacher_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<CourseListParams>,
) -> Result<Json<ListPage<Course>>, AppError> {
    let (courses, total) =
        CourseService::list_by_teacher(&state.db, auth_user.user_id()?, &params).await?;
    Ok(Json(ListPage::new(courses, total, &params.list)))
}

#[utoipa::path(
    post,
    path = "/api/teacher/courses/{course_id}/lessons",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = CreateLessonDto,
    responses(
        (status = 200, description = "Lesson created", body = Lesson),
        (status = 404, description = "Course not found or not owned", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_lesson(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    let caller = auth_user.identity()?;
    let lesson = CourseService::create_lesson(&state.db, &caller, course_id, dto).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    put,
    path = "/api/teacher/courses/{course_id}/lessons/{lesson_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("lesson_id" = Uuid, Path, description = "Lesson ID")
    ),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 404, description = "Lesson not found or course not owned", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_lesson(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, lesson_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    let caller = auth_user.identity()?;
    let lesson =
        CourseService::update_lesson(&state.db, &caller, course_id, lesson_id, dto).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    delete,
    path = "/api/teacher/courses/{course_id}/lessons/{lesson_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID"),
        ("lesson_id" = Uuid, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson deleted"),
        (status = 404, description = "Lesson not found or course not owned", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((course_id, lesson_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let caller = auth_user.identity()?;
    CourseService::delete_lesson(&state.db, &caller, course_id, lesson_id).await?;
    Ok(Json(json!({"message": "Lesson deleted successfully"})))
}

#[utoipa::path(
    get,
    path = "/api/admin/courses",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("search" = Option<String>, Query, description = "Match against title and description")
    ),
    responses((status = 200, description = "All courses, drafts included")),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn admin_list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseListParams>,
) -> Result<Json<ListPage<Course>>, AppError> {
    let (courses, total) = CourseService::list_all(&state.db, &params).await?;
    Ok(Json(ListPage::new(courses, total, &params.list)))
}

#[utoipa::path(
    post,
    path = "/api/admin/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 200, description = "Course created", body = Course),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok(Json(course))
}

#[utoipa::path(
    put,
    path = "/api/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/admin/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(Json(json!({"message": "Course deleted successfully"})))
}

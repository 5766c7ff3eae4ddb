//! Course, lesson and enrollment models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::ListParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: Option<Uuid>,
    pub published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub body: String,
    pub position: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Course detail with its lessons, ordered by position.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseWithLessons {
    #[serde(flatten)]
    pub course: Course,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: Option<Uuid>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<Uuid>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub body: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnrollDto {
    pub course_id: Uuid,
}

/// Query parameters for course listings. Search matches title and
/// description.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CourseListParams {
    #[serde(flatten)]
    pub list: ListParams,
}

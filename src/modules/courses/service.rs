use anyhow::Context;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::{
    Course, CourseListParams, CourseWithLessons, CreateCourseDto, CreateLessonDto, Lesson,
    UpdateCourseDto, UpdateLessonDto,
};
use crate::modules::users::model::Role;
use crate::policy::Identity;
use crate::utils::errors::AppError;

const COURSE_COLUMNS: &str =
    "id, title, description, teacher_id, published, created_at, updated_at";
const LESSON_COLUMNS: &str = "id, course_id, title, body, position, created_at, updated_at";

fn course_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Course not found"))
}

pub struct CourseService;

impl CourseService {
    /// Public catalog: published courses only, newest first.
    #[instrument(skip(db))]
    pub async fn list_published(
        db: &PgPool,
        params: &CourseListParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        Self::list_filtered(db, params, Some(true), None).await
    }

    /// Admin listing: every course, including drafts.
    #[instrument(skip(db))]
    pub async fn list_all(
        db: &PgPool,
        params: &CourseListParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        Self::list_filtered(db, params, None, None).await
    }

    /// Courses owned by one teacher.
    #[instrument(skip(db))]
    pub async fn list_by_teacher(
        db: &PgPool,
        teacher_id: Uuid,
        params: &CourseListParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        Self::list_filtered(db, params, None, Some(teacher_id)).await
    }

    async fn list_filtered(
        db: &PgPool,
        params: &CourseListParams,
        published: Option<bool>,
        teacher_id: Option<Uuid>,
    ) -> Result<(Vec<Course>, i64), AppError> {
        let push_filters = |qb: &mut QueryBuilder<'_, Postgres>| {
            qb.push(" WHERE TRUE");

            if let Some(published) = published {
                qb.push(" AND published = ").push_bind(published);
            }
            if let Some(teacher_id) = teacher_id {
                qb.push(" AND teacher_id = ").push_bind(teacher_id);
            }
            if let Some(search) = params.list.search() {
                let pattern = format!("%{}%", search);
                qb.push(" AND (title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR description ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        };

        let mut fetch = QueryBuilder::new(format!("SELECT {COURSE_COLUMNS} FROM courses"));
        push_filters(&mut fetch);
        fetch
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(params.list.limit())
            .push(" OFFSET ")
            .push_bind(params.list.offset());

        let courses = fetch
            .build_query_as::<Course>()
            .fetch_all(db)
            .await
            .context("Failed to list courses")
            .map_err(AppError::database)?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM courses");
        push_filters(&mut count);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count courses")
            .map_err(AppError::database)?;

        Ok((courses, total))
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch course")
        .map_err(AppError::database)?
        .ok_or_else(course_not_found)
    }

    /// Catalog detail: drafts are invisible to the public.
    #[instrument(skip(db))]
    pub async fn get_published_course(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        let course = Self::get_course(db, id).await?;
        if !course.published {
            return Err(course_not_found());
        }
        Ok(course)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (title, description, teacher_id, published) \
             VALUES ($1, $2, $3, $4) RETURNING {COURSE_COLUMNS}"
        ))
        .bind(dto.title)
        .bind(dto.description)
        .bind(dto.teacher_id)
        .bind(dto.published)
        .fetch_one(db)
        .await
        .context("Failed to create course")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let existing = Self::get_course(db, id).await?;

        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET title = $1, description = $2, teacher_id = $3, \
             published = $4, updated_at = NOW() WHERE id = $5 RETURNING {COURSE_COLUMNS}"
        ))
        .bind(dto.title.unwrap_or(existing.title))
        .bind(dto.description.or(existing.description))
        .bind(dto.teacher_id.or(existing.teacher_id))
        .bind(dto.published.unwrap_or(existing.published))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update course")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete course")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(course_not_found());
        }
        Ok(())
    }

    /// Enrolls a student into a published course. Enrolling twice is a
    /// no-op reported as a client error.
    #[instrument(skip(db))]
    pub async fn enroll(db: &PgPool, user_id: Uuid, course_id: Uuid) -> Result<(), AppError> {
        // Existence check doubles as the draft filter.
        Self::get_published_course(db, course_id).await?;

        let result = sqlx::query(
            "INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(db)
        .await
        .context("Failed to enroll")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Already enrolled in this course"
            )));
        }
        Ok(())
    }

    /// Courses the student is enrolled in, newest enrollment first.
    #[instrument(skip(db))]
    pub async fn list_enrolled(
        db: &PgPool,
        user_id: Uuid,
        params: &CourseListParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        let push_filters = |qb: &mut QueryBuilder<'_, Postgres>| {
            qb.push(" JOIN enrollments e ON e.course_id = c.id AND e.user_id = ")
                .push_bind(user_id);

            if let Some(search) = params.list.search() {
                let pattern = format!("%{}%", search);
                qb.push(" WHERE (c.title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR c.description ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        };

        let mut fetch = QueryBuilder::new(
            "SELECT c.id, c.title, c.description, c.teacher_id, c.published, \
             c.created_at, c.updated_at FROM courses c",
        );
        push_filters(&mut fetch);
        fetch
            .push(" ORDER BY e.created_at DESC LIMIT ")
            .push_bind(params.list.limit())
            .push(" OFFSET ")
            .push_bind(params.list.offset());

        let courses = fetch
            .build_query_as::<Course>()
            .fetch_all(db)
            .await
            .context("Failed to list enrolled courses")
            .map_err(AppError::database)?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM courses c");
        push_filters(&mut count);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count enrolled courses")
            .map_err(AppError::database)?;

        Ok((courses, total))
    }

    /// Course detail for an enrolled student. A course the caller is not
    /// enrolled in looks exactly like a missing one.
    #[instrument(skip(db))]
    pub async fn get_enrolled_course(
        db: &PgPool,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<CourseWithLessons, AppError> {
        let enrolled: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2)",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .context("Failed to check enrollment")
        .map_err(AppError::database)?;

        if !enrolled {
            return Err(course_not_found());
        }

        let course = Self::get_course(db, course_id).await?;
        let lessons = Self::list_lessons(db, course_id).await?;

        Ok(CourseWithLessons { course, lessons })
    }

    #[instrument(skip(db))]
    pub async fn list_lessons(db: &PgPool, course_id: Uuid) -> Result<Vec<Lesson>, AppError> {
        sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE course_id = $1 ORDER BY position, created_at"
        ))
        .bind(course_id)
        .fetch_all(db)
        .await
        .context("Failed to list lessons")
        .map_err(AppError::database)
    }

    /// Loads the course if the caller may manage it: admins manage any
    /// course, teachers only their own. Misses read as `NotFound`.
    #[instrument(skip(db))]
    pub async fn get_managed_course(
        db: &PgPool,
        caller: &Identity,
        course_id: Uuid,
    ) -> Result<Course, AppError> {
        let course = Self::get_course(db, course_id).await?;

        if caller.role != Role::Admin && course.teacher_id != Some(caller.id) {
            return Err(course_not_found());
        }
        Ok(course)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_lesson(
        db: &PgPool,
        caller: &Identity,
        course_id: Uuid,
        dto: CreateLessonDto,
    ) -> Result<Lesson, AppError> {
        Self::get_managed_course(db, caller, course_id).await?;

        sqlx::query_as::<_, Lesson>(&format!(
            "INSERT INTO lessons (course_id, title, body, position) \
             VALUES ($1, $2, $3, $4) RETURNING {LESSON_COLUMNS}"
        ))
        .bind(course_id)
        .bind(dto.title)
        .bind(dto.body)
        .bind(dto.position)
        .fetch_one(db)
        .await
        .context("Failed to create lesson")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_lesson(
        db: &PgPool,
        caller: &Identity,
        course_id: Uuid,
        lesson_id: Uuid,
        dto: UpdateLessonDto,
    ) -> Result<Lesson, AppError> {
        Self::get_managed_course(db, caller, course_id).await?;

        let existing = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1 AND course_id = $2"
        ))
        .bind(lesson_id)
        .bind(course_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch lesson")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))?;

        sqlx::query_as::<_, Lesson>(&format!(
            "UPDATE lessons SET title = $1, body = $2, position = $3, updated_at = NOW() \
             WHERE id = $4 RETURNING {LESSON_COLUMNS}"
        ))
        .bind(dto.title.unwrap_or(existing.title))
        .bind(dto.body.unwrap_or(existing.body))
        .bind(dto.position.unwrap_or(existing.position))
        .bind(lesson_id)
        .fetch_one(db)
        .await
        .context("Failed to update lesson")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_lesson(
        db: &PgPool,
        caller: &Identity,
        course_id: Uuid,
        lesson_id: Uuid,
    ) -> Result<(), AppError> {
        Self::get_managed_course(db, caller, course_id).await?;

        let result = sqlx::query("DELETE FROM lessons WHERE id = $1 AND course_id = $2")
            .bind(lesson_id)
            .bind(course_id)
            .execute(db)
            .await
            .context("Failed to delete lesson")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Lesson not found")));
        }
        Ok(())
    }
}

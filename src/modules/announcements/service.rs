use anyhow::Context;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::announcements::model::{
    Announcement, AnnouncementListParams, CreateAnnouncementDto, UpdateAnnouncementDto,
};
use crate::utils::errors::AppError;

const COLUMNS: &str = "id, title, body, author_id, created_at, updated_at";

pub struct AnnouncementService;

impl AnnouncementService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: &AnnouncementListParams,
    ) -> Result<(Vec<Announcement>, i64), AppError> {
        let push_filters = |qb: &mut QueryBuilder<'_, Postgres>| {
            qb.push(" WHERE TRUE");
            if let Some(search) = params.list.search() {
                let pattern = format!("%{}%", search);
                qb.push(" AND (title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR body ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        };

        let mut fetch = QueryBuilder::new(format!("SELECT {COLUMNS} FROM announcements"));
        push_filters(&mut fetch);
        fetch
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(params.list.limit())
            .push(" OFFSET ")
            .push_bind(params.list.offset());

        let announcements = fetch
            .build_query_as::<Announcement>()
            .fetch_all(db)
            .await
            .context("Failed to list announcements")
            .map_err(AppError::database)?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM announcements");
        push_filters(&mut count);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count announcements")
            .map_err(AppError::database)?;

        Ok((announcements, total))
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Announcement, AppError> {
        sqlx::query_as::<_, Announcement>(&format!(
            "SELECT {COLUMNS} FROM announcements WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch announcement")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Announcement not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        author_id: Uuid,
        dto: CreateAnnouncementDto,
    ) -> Result<Announcement, AppError> {
        sqlx::query_as::<_, Announcement>(&format!(
            "INSERT INTO announcements (title, body, author_id) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(dto.title)
        .bind(dto.body)
        .bind(author_id)
        .fetch_one(db)
        .await
        .context("Failed to create announcement")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAnnouncementDto,
    ) -> Result<Announcement, AppError> {
        let existing = Self::get(db, id).await?;

        sqlx::query_as::<_, Announcement>(&format!(
            "UPDATE announcements SET title = $1, body = $2, updated_at = NOW() \
             WHERE id = $3 RETURNING {COLUMNS}"
        ))
        .bind(dto.title.unwrap_or(existing.title))
        .bind(dto.body.unwrap_or(existing.body))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update announcement")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete announcement")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Announcement not found"
            )));
        }
        Ok(())
    }
}

use anyhow::Context;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::posts::model::{CreatePostDto, Post, PostListParams, UpdatePostDto};
use crate::utils::errors::AppError;

const COLUMNS: &str = "id, title, slug, body, author_id, published, created_at, updated_at";

fn post_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Post not found"))
}

pub struct PostService;

impl PostService {
    /// Published posts for the public blog; `include_drafts` flips the
    /// admin view.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: &PostListParams,
        include_drafts: bool,
    ) -> Result<(Vec<Post>, i64), AppError> {
        let push_filters = |qb: &mut QueryBuilder<'_, Postgres>| {
            qb.push(" WHERE TRUE");
            if !include_drafts {
                qb.push(" AND published = TRUE");
            }
            if let Some(search) = params.list.search() {
                let pattern = format!("%{}%", search);
                qb.push(" AND (title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR body ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        };

        let mut fetch = QueryBuilder::new(format!("SELECT {COLUMNS} FROM posts"));
        push_filters(&mut fetch);
        fetch
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(params.list.limit())
            .push(" OFFSET ")
            .push_bind(params.list.offset());

        let posts = fetch
            .build_query_as::<Post>()
            .fetch_all(db)
            .await
            .context("Failed to list posts")
            .map_err(AppError::database)?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM posts");
        push_filters(&mut count);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count posts")
            .map_err(AppError::database)?;

        Ok((posts, total))
    }

    /// Slug lookup for the public blog; drafts are invisible.
    #[instrument(skip(db))]
    pub async fn get_by_slug(db: &PgPool, slug: &str) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {COLUMNS} FROM posts WHERE slug = $1 AND published = TRUE"
        ))
        .bind(slug)
        .fetch_optional(db)
        .await
        .context("Failed to fetch post by slug")
        .map_err(AppError::database)?
        .ok_or_else(post_not_found)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(&format!("SELECT {COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch post")
            .map_err(AppError::database)?
            .ok_or_else(post_not_found)
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, author_id: Uuid, dto: CreatePostDto) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (title, slug, body, author_id, published) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(dto.title)
        .bind(&dto.slug)
        .bind(dto.body)
        .bind(author_id)
        .bind(dto.published)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "A post with slug {} already exists",
                        dto.slug
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdatePostDto) -> Result<Post, AppError> {
        let existing = Self::get(db, id).await?;
        let slug = dto.slug.unwrap_or(existing.slug);

        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET title = $1, slug = $2, body = $3, published = $4, \
             updated_at = NOW() WHERE id = $5 RETURNING {COLUMNS}"
        ))
        .bind(dto.title.unwrap_or(existing.title))
        .bind(&slug)
        .bind(dto.body.unwrap_or(existing.body))
        .bind(dto.published.unwrap_or(existing.published))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "A post with slug {} already exists",
                        slug
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete post")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found());
        }
        Ok(())
    }
}

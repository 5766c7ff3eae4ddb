use anyhow::Context;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::tickets::model::{
    CreateTicketDto, Ticket, TicketListParams, TicketPriority, UpdateTicketStatusDto,
};
use crate::utils::errors::AppError;

const COLUMNS: &str = "id, user_id, subject, body, status, priority, created_at, updated_at";

fn ticket_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Ticket not found"))
}

pub struct TicketService;

impl TicketService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateTicketDto,
    ) -> Result<Ticket, AppError> {
        sqlx::query_as::<_, Ticket>(&format!(
            "INSERT INTO tickets (user_id, subject, body, priority) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(user_id)
        .bind(dto.subject)
        .bind(dto.body)
        .bind(dto.priority.unwrap_or(TicketPriority::Normal))
        .fetch_one(db)
        .await
        .context("Failed to create ticket")
        .map_err(AppError::database)
    }

    /// Lists tickets matching the filters; when `owner` is set the
    /// predicate is additionally scoped to that caller's tickets.
    ///
    /// Two reads over the same predicate, no transaction: count and fetch
    /// may observe different snapshots under concurrent writes.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        owner: Option<Uuid>,
        params: &TicketListParams,
    ) -> Result<(Vec<Ticket>, i64), AppError> {
        let push_filters = |qb: &mut QueryBuilder<'_, Postgres>| {
            qb.push(" WHERE TRUE");

            if let Some(owner) = owner {
                qb.push(" AND user_id = ").push_bind(owner);
            }
            if let Some(search) = params.list.search() {
                let pattern = format!("%{}%", search);
                qb.push(" AND (subject ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR body ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
            if let Some(status) = params.status {
                qb.push(" AND status = ").push_bind(status);
            }
            if let Some(priority) = params.priority {
                qb.push(" AND priority = ").push_bind(priority);
            }
        };

        let mut fetch = QueryBuilder::new(format!("SELECT {COLUMNS} FROM tickets"));
        push_filters(&mut fetch);
        fetch
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(params.list.limit())
            .push(" OFFSET ")
            .push_bind(params.list.offset());

        let tickets = fetch
            .build_query_as::<Ticket>()
            .fetch_all(db)
            .await
            .context("Failed to list tickets")
            .map_err(AppError::database)?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM tickets");
        push_filters(&mut count);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(db)
            .await
            .context("Failed to count tickets")
            .map_err(AppError::database)?;

        Ok((tickets, total))
    }

    /// Fetches one ticket; when `owner` is set, a ticket belonging to
    /// someone else reads as missing.
    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, owner: Option<Uuid>, id: Uuid) -> Result<Ticket, AppError> {
        let mut qb = QueryBuilder::new(format!("SELECT {COLUMNS} FROM tickets WHERE id = "));
        qb.push_bind(id);
        if let Some(owner) = owner {
            qb.push(" AND user_id = ").push_bind(owner);
        }

        qb.build_query_as::<Ticket>()
            .fetch_optional(db)
            .await
            .context("Failed to fetch ticket")
            .map_err(AppError::database)?
            .ok_or_else(ticket_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTicketStatusDto,
    ) -> Result<Ticket, AppError> {
        let existing = Self::get(db, None, id).await?;

        sqlx::query_as::<_, Ticket>(&format!(
            "UPDATE tickets SET status = $1, priority = $2, updated_at = NOW() \
             WHERE id = $3 RETURNING {COLUMNS}"
        ))
        .bind(dto.status)
        .bind(dto.priority.unwrap_or(existing.priority))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update ticket")
        .map_err(AppError::database)
    }
}

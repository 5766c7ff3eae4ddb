//! Support ticket models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{ListPage, ListParams};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "ticket_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ticket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub body: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTicketDto {
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
    pub priority: Option<TicketPriority>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTicketStatusDto {
    pub status: TicketStatus,
    pub priority: Option<TicketPriority>,
}

/// Query parameters for ticket listings. Search matches subject and body;
/// status and priority are exact matches ANDed with the search.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TicketListParams {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    #[serde(flatten)]
    pub list: ListParams,
}

/// Legacy response shape for the admin ticket listing.
///
/// Predates the standard [`ListPage`] shape and is kept as a compatibility
/// shim for the existing admin dashboard; new endpoints must not use it.
#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyTicketsResponse {
    pub tickets: Vec<Ticket>,
    pub pagination: LegacyPagination,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LegacyPagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl LegacyTicketsResponse {
    pub fn from_page(page: ListPage<Ticket>, limit: i64) -> Self {
        Self {
            pagination: LegacyPagination {
                page: page.current_page,
                limit,
                total: page.total,
                pages: page.pages,
            },
            tickets: page.items,
        }
    }
}

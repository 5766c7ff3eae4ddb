use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::tickets::model::{
    CreateTicketDto, LegacyTicketsResponse, Ticket, TicketListParams, UpdateTicketStatusDto,
};
use crate::modules::tickets::service::TicketService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::ListPage;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/user/tickets",
    request_body = CreateTicketDto,
    responses(
        (status = 200, description = "Ticket created", body = Ticket),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
#[instrument(skip(state, dto))]
pub async fn create_ticket(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTicketDto>,
) -> Result<Json<Ticket>, AppError> {
    let ticket = TicketService::create(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(ticket))
}

#[utoipa::path(
    get,
    path = "/api/user/tickets",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("search" = Option<String>, Query, description = "Match against subject and body"),
        ("status" = Option<String>, Query, description = "Exact status filter"),
        ("priority" = Option<String>, Query, description = "Exact priority filter")
    ),
    responses((status = 200, description = "Caller's tickets")),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
#[instrument(skip(state))]
pub async fn my_tickets(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<TicketListParams>,
) -> Result<Json<ListPage<Ticket>>, AppError> {
    let (tickets, total) =
        TicketService::list(&state.db, Some(auth_user.user_id()?), &params).await?;
    Ok(Json(ListPage::new(tickets, total, &params.list)))
}

#[utoipa::path(
    get,
    path = "/api/user/tickets/{id}",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket", body = Ticket),
        (status = 404, description = "Ticket not found or not owned", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
#[instrument(skip(state))]
pub async fn my_ticket_detail(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Ticket>, AppError> {
    let ticket = TicketService::get(&state.db, Some(auth_user.user_id()?), id).await?;
    Ok(Json(ticket))
}

#[utoipa::path(
    get,
    path = "/api/admin/tickets",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("search" = Option<String>, Query, description = "Match against subject and body"),
        ("status" = Option<String>, Query, description = "Exact status filter"),
        ("priority" = Option<String>, Query, description = "Exact priority filter")
    ),
    responses(
        (status = 200, description = "All tickets, legacy response shape", body = LegacyTicketsResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
#[instrument(skip(state))]
pub async fn admin_list_tickets(
    State(state): State<AppState>,
    Query(params): Query<TicketListParams>,
) -> Result<Json<LegacyTicketsResponse>, AppError> {
    let (tickets, total) = TicketService::list(&state.db, None, &params).await?;
    let page = ListPage::new(tickets, total, &params.list);

    // Compatibility shim: the admin dashboard still consumes the old
    // `{tickets, pagination}` shape.
    Ok(Json(LegacyTicketsResponse::from_page(
        page,
        params.list.limit(),
    )))
}

#[utoipa::path(
    put,
    path = "/api/admin/tickets/{id}/status",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = UpdateTicketStatusDto,
    responses(
        (status = 200, description = "Ticket updated", body = Ticket),
        (status = 404, description = "Ticket not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
#[instrument(skip(state))]
pub async fn update_ticket_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTicketStatusDto>,
) -> Result<Json<Ticket>, AppError> {
    let ticket = TicketService::update_status(&state.db, id, dto).await?;
    Ok(Json(ticket))
}

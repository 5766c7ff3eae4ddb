use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::announcements::model::{
    Announcement, AnnouncementListParams, CreateAnnouncementDto, UpdateAnnouncementDto,
};
use crate::modules::announcements::service::AnnouncementService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::ListPage;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/public/announcements",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("search" = Option<String>, Query, description = "Match against title and body")
    ),
    responses((status = 200, description = "Paginated announcements")),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn list_announcements(
    State(state): State<AppState>,
    Query(params): Query<AnnouncementListParams>,
) -> Result<Json<ListPage<Announcement>>, AppError> {
    let (announcements, total) = AnnouncementService::list(&state.db, &params).await?;
    Ok(Json(ListPage::new(announcements, total, &params.list)))
}

#[utoipa::path(
    get,
    path = "/api/public/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement", body = Announcement),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    ),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn get_announcement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Announcement>, AppError> {
    let announcement = AnnouncementService::get(&state.db, id).await?;
    Ok(Json(announcement))
}

#[utoipa::path(
    post,
    path = "/api/admin/announcements",
    request_body = CreateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement created", body = Announcement),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, dto))]
pub async fn create_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateAnnouncementDto>,
) -> Result<Json<Announcement>, AppError> {
    let announcement =
        AnnouncementService::create(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(announcement))
}

#[utoipa::path(
    put,
    path = "/api/admin/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    request_body = UpdateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement updated", body = Announcement),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state, dto))]
pub async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAnnouncementDto>,
) -> Result<Json<Announcement>, AppError> {
    let announcement = AnnouncementService::update(&state.db, id, dto).await?;
    Ok(Json(announcement))
}

#[utoipa::path(
    delete,
    path = "/api/admin/announcements/{id}",
    params(("id" = Uuid, Path, description = "Announcement ID")),
    responses(
        (status = 200, description = "Announcement deleted"),
        (status = 404, description = "Announcement not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    AnnouncementService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Announcement deleted successfully"})))
}

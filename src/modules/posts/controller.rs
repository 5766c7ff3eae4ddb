use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::posts::model::{CreatePostDto, Post, PostListParams, UpdatePostDto};
use crate::modules::posts::service::PostService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::ListPage;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/public/posts",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("search" = Option<String>, Query, description = "Match against title and body")
    ),
    responses((status = 200, description = "Published blog posts")),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostListParams>,
) -> Result<Json<ListPage<Post>>, AppError> {
    let (posts, total) = PostService::list(&state.db, &params, false).await?;
    Ok(Json(ListPage::new(posts, total, &params.list)))
}

#[utoipa::path(
    get,
    path = "/api/public/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = PostService::get_by_slug(&state.db, &slug).await?;
    Ok(Json(post))
}

#[utoipa::path(
    get,
    path = "/api/admin/posts",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<i64>, Query, description = "Items per page (1-100)"),
        ("search" = Option<String>, Query, description = "Match against title and body")
    ),
    responses((status = 200, description = "All posts, drafts included")),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn admin_list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostListParams>,
) -> Result<Json<ListPage<Post>>, AppError> {
    let (posts, total) = PostService::list(&state.db, &params, true).await?;
    Ok(Json(ListPage::new(posts, total, &params.list)))
}

#[utoipa::path(
    post,
    path = "/api/admin/posts",
    request_body = CreatePostDto,
    responses(
        (status = 200, description = "Post created", body = Post),
        (status = 400, description = "Slug already taken", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state, dto))]
pub async fn create_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePostDto>,
) -> Result<Json<Post>, AppError> {
    let post = PostService::create(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(post))
}

#[utoipa::path(
    put,
    path = "/api/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state, dto))]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePostDto>,
) -> Result<Json<Post>, AppError> {
    let post = PostService::update(&state.db, id, dto).await?;
    Ok(Json(post))
}

#[utoipa::path(
    delete,
    path = "/api/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    PostService::delete(&state.db, id).await?;
    Ok(Json(json!({"message": "Post deleted successfully"})))
}

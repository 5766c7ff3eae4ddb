//! Route-layer trust gates for the API surface.
//!
//! Each API namespace declares its trust level once, as a `route_layer` in
//! the router. The gate runs before the handler; on failure the handler
//! body never executes, so a rejected call observes no partial side
//! effects. Missing identity yields `UNAUTHORIZED`, an insufficient role
//! yields `FORBIDDEN`.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::policy::{RouteClass, role_satisfies};
use crate::state::AppState;
use crate::utils::errors::AppError;

async fn require_class(
    state: AppState,
    req: Request,
    next: Next,
    class: RouteClass,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !role_satisfies(class, auth_user.role()) {
        return Err(AppError::forbidden(anyhow::anyhow!(
            "Access denied. Required: {:?}, caller role: {:?}",
            class,
            auth_user.role()
        )));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Gate for `/api/user`: any authenticated identity.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_class(state, req, next, RouteClass::Authenticated).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Gate for `/api/student`: students only.
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_class(state, req, next, RouteClass::Student).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Gate for `/api/teacher`: teachers and admins.
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_class(state, req, next, RouteClass::TeacherOrAdmin).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Gate for `/api/admin`: admins only.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_class(state, req, next, RouteClass::Admin).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

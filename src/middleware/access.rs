//! Access-decision middleware for the page surface.
//!
//! Resolves the request identity once (invalid credentials count as
//! anonymous), runs the declarative route policy, and either lets the
//! request through or redirects: anonymous callers go to sign-in with the
//! original path preserved as `callbackUrl`, authenticated callers with an
//! insufficient role go to their own role home. No data access happens
//! before the decision.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::middleware::auth::resolve_identity;
use crate::policy::{Access, decide};
use crate::state::AppState;

pub async fn page_access(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let identity = resolve_identity(req.headers(), &state.jwt_config);
    let path = req.uri().path();

    match decide(identity.as_ref(), path) {
        Access::Allow => next.run(req).await,
        Access::Redirect(target) => {
            debug!(path = %path, target = %target, "Access redirect");
            Redirect::temporary(&target).into_response()
        }
    }
}

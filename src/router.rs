use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::access::page_access;
use crate::middleware::gate::{require_admin, require_authenticated, require_student, require_teacher};
use crate::modules::announcements::router::{
    init_admin_announcements_router, init_public_announcements_router,
};
use crate::modules::auth::router::init_auth_router;
use crate::modules::courses::router::{
    init_admin_courses_router, init_public_courses_router, init_student_courses_router,
    init_teacher_courses_router,
};
use crate::modules::pages::router::init_pages_router;
use crate::modules::posts::router::{init_admin_posts_router, init_public_posts_router};
use crate::modules::tickets::router::{init_admin_tickets_router, init_user_tickets_router};
use crate::modules::users::router::{init_admin_users_router, init_user_router};
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application router.
///
/// API namespaces declare their trust level exactly once, as a
/// `route_layer` gate; the page surface is guarded by the access
/// middleware. Both evaluate the policy vocabulary in [`crate::policy`].
pub fn init_router(state: AppState) -> Router {
    let public_api = Router::new()
        .nest("/courses", init_public_courses_router())
        .nest("/announcements", init_public_announcements_router())
        .nest("/posts", init_public_posts_router());

    let user_api = Router::new()
        .merge(init_user_router())
        .nest("/tickets", init_user_tickets_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        ));

    let student_api = init_student_courses_router().route_layer(
        middleware::from_fn_with_state(state.clone(), require_student),
    );

    let teacher_api = init_teacher_courses_router().route_layer(
        middleware::from_fn_with_state(state.clone(), require_teacher),
    );

    let admin_api = Router::new()
        .nest("/users", init_admin_users_router())
        .nest("/courses", init_admin_courses_router())
        .nest("/announcements", init_admin_announcements_router())
        .nest("/posts", init_admin_posts_router())
        .nest("/tickets", init_admin_tickets_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/public", public_api)
                .nest("/user", user_api)
                .nest("/student", student_api)
                .nest("/teacher", teacher_api)
                .nest("/admin", admin_api),
        )
        .merge(
            // `layer` rather than `route_layer` so the access check also
            // wraps the page fallback and runs for unmatched paths.
            init_pages_router().layer(middleware::from_fn_with_state(state.clone(), page_access)),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}

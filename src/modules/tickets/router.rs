use crate::modules::tickets::controller::{
    admin_list_tickets, create_ticket, my_ticket_detail, my_tickets, update_ticket_status,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

/// Routes nested under `/api/user/tickets` (any authenticated identity).
pub fn init_user_tickets_router() -> Router<AppState> {
    Router::new()
        .route("/", get(my_tickets).post(create_ticket))
        .route("/{id}", get(my_ticket_detail))
}

/// Routes nested under `/api/admin/tickets` (admin only).
pub fn init_admin_tickets_router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_list_tickets))
        .route("/{id}/status", put(update_ticket_status))
}

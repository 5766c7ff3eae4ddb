//! Feature modules.
//!
//! Each module follows the same structure: `controller.rs` (HTTP
//! handlers), `service.rs` (business logic and queries), `model.rs`
//! (entities and DTOs), `router.rs` (route wiring).

pub mod announcements;
pub mod auth;
pub mod courses;
pub mod pages;
pub mod posts;
pub mod tickets;
pub mod users;

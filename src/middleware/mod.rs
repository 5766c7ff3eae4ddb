//! Request middleware.
//!
//! - [`auth`]: Identity resolution and the `AuthUser` extractor
//! - [`access`]: Page-surface access decisions (allow or redirect)
//! - [`gate`]: API-surface trust gates (401/403 before the handler runs)
//!
//! The page middleware and the API gates both evaluate the policy table in
//! [`crate::policy`]; neither carries its own role logic.

pub mod access;
pub mod auth;
pub mod gate;

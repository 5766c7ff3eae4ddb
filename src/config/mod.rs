//! Application configuration, loaded from environment variables.
//!
//! - [`cors`]: Allowed origin configuration
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: Token secret and expiry configuration

pub mod cors;
pub mod database;
pub mod jwt;

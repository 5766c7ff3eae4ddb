//! Shared utilities.
//!
//! - [`errors`]: Application error types and HTTP conversion
//! - [`jwt`]: Access token creation and verification
//! - [`pagination`]: List query parameters and page assembly
//! - [`password`]: Password hashing and verification

pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;

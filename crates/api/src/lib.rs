// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Quillbox API Library
//!
//! This crate contains the HTTP server components for Quillbox:
//! authentication (password hashing, token issuance and validation,
//! per-request identity resolution) and ownership-checked note CRUD.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the `TaskTrack` API server.

pub mod auth;

pub use auth::{require_auth, CurrentUser};

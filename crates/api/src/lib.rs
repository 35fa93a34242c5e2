//! HTTP API layer for wren.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: posts, followers, profiles, auth, admin
//! - **Extractors**: authentication
//! - **Middleware**: bearer-token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::{auth_router, home_router, router};
pub use middleware::{auth_middleware, AppState};

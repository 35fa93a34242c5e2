//! API endpoints.

mod admin;
mod auth;
mod followers;
mod home;
mod posts;
mod profiles;

use axum::Router;

use crate::middleware::AppState;

/// Create the `/api` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/posts", posts::router())
        .nest("/followers", followers::router())
        .nest("/profiles", profiles::router())
        .nest("/admin", admin::router())
}

/// Create the root-level authentication router.
pub fn auth_router() -> Router<AppState> {
    auth::router()
}

/// Create the root redirect router.
pub fn home_router() -> Router<AppState> {
    home::router()
}

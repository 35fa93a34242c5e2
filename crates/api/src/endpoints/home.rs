//! Root redirect.

use axum::{response::Redirect, routing::get, Router};

use crate::{extractors::MaybeAuthUser, middleware::AppState};

/// Redirect from the root path.
///
/// Authenticated users land on the admin surface, everyone else on the
/// sign-in page. The root itself serves no content.
async fn home(MaybeAuthUser(user): MaybeAuthUser) -> Redirect {
    if user.is_some() {
        Redirect::temporary("/admin")
    } else {
        Redirect::temporary("/login")
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}

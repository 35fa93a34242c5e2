//! Admin endpoints.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use wren_common::{AppError, AppResult};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Bulk unfollow request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUnfollowRequest {
    pub ids: Vec<String>,
}

/// Bulk unfollow response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUnfollowResponse {
    pub deleted: u64,
}

/// Delete follow relationships in bulk. Admin only.
///
/// Unlike the owner-scoped unfollow, this removes any follow row by ID.
async fn bulk_unfollow(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<BulkUnfollowRequest>,
) -> AppResult<ApiResponse<BulkUnfollowResponse>> {
    if !user.is_admin {
        return Err(AppError::Forbidden("Admin privileges required".to_string()));
    }

    let deleted = state.follow_service.bulk_unfollow(&req.ids).await?;

    Ok(ApiResponse::ok(BulkUnfollowResponse { deleted }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/follows/delete-many", post(bulk_unfollow))
}

//! Follower endpoints.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use wren_common::AppResult;
use wren_db::entities::follow;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Follow response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    pub id: String,
    pub follower_id: String,
    pub followee_id: String,
    pub followee_username: String,
    pub created_at: String,
}

impl FollowResponse {
    fn from_model(follow: follow::Model, followee_username: String) -> Self {
        Self {
            id: follow.id,
            follower_id: follow.follower_id,
            followee_id: follow.followee_id,
            followee_username,
            created_at: follow.created_at.to_rfc3339(),
        }
    }
}

/// Following list response: usernames the requester currently follows.
#[derive(Serialize)]
pub struct FollowingListResponse {
    pub following: Vec<String>,
}

/// List the usernames the requester follows, in follow order.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<FollowingListResponse>> {
    let following = state.follow_service.following_usernames(&user.id).await?;

    Ok(ApiResponse::ok(FollowingListResponse { following }))
}

/// Follow request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    /// ID of the user to follow.
    pub following: String,
}

/// Follow a user by ID.
///
/// Responds 201 when a new relationship is created and 200 when the
/// requester already follows the target.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<ApiResponse<FollowResponse>> {
    let outcome = state.follow_service.follow(&user.id, &req.following).await?;

    let response = FollowResponse::from_model(outcome.follow, outcome.followee_username);
    if outcome.created {
        Ok(ApiResponse::created(response))
    } else {
        Ok(ApiResponse::ok(response))
    }
}

/// Unfollow: remove a follow relationship owned by the requester.
async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.follow_service.unfollow(&user.id, &id).await?;
    Ok(crate::response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", axum::routing::delete(remove))
}

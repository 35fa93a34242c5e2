//! Profile endpoints.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use wren_common::AppResult;
use wren_core::UpdateProfileInput;
use wren_db::entities::profile;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Profile response. The password hash is never exposed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: String,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<profile::Model> for ProfileResponse {
    fn from(profile: profile::Model) -> Self {
        Self {
            user_id: profile.user_id,
            bio: profile.bio,
            profile_picture: profile.profile_picture,
            created_at: profile.created_at.to_rfc3339(),
            updated_at: profile.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Get the requester's own profile.
async fn get_own(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let profile = state.profile_service.get_own(&user.id).await?;
    Ok(ApiResponse::ok(profile.into()))
}

/// Update profile request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(flatten)]
    pub input: UpdateProfileInput,
}

/// Update the requester's own profile. Absent fields are left untouched.
async fn update_own(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let profile = state.profile_service.update_own(&user.id, req.input).await?;
    Ok(ApiResponse::ok(profile.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_own).put(update_own).post(update_own))
}

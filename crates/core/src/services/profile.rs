//! Profile service.

use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use wren_common::AppResult;
use wren_db::{entities::profile, repositories::ProfileRepository};

/// Profile service for business logic.
#[derive(Clone)]
pub struct ProfileService {
    profile_repo: ProfileRepository,
}

/// Input for updating a profile. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(max = 2000))]
    pub bio: Option<String>,

    #[validate(url)]
    pub profile_picture: Option<String>,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(profile_repo: ProfileRepository) -> Self {
        Self { profile_repo }
    }

    /// Get a user's own profile.
    pub async fn get_own(&self, user_id: &str) -> AppResult<profile::Model> {
        self.profile_repo.get_by_user_id(user_id).await
    }

    /// Update a user's own profile.
    pub async fn update_own(
        &self,
        user_id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<profile::Model> {
        input.validate()?;

        let current = self.profile_repo.get_by_user_id(user_id).await?;

        let mut active: profile::ActiveModel = current.into();
        if let Some(bio) = input.bio {
            active.bio = Set(Some(bio));
        }
        if let Some(picture) = input.profile_picture {
            active.profile_picture = Set(Some(picture));
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.profile_repo.update(active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use wren_common::AppError;

    #[tokio::test]
    async fn test_get_own_missing_profile() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<profile::Model>::new()])
                .into_connection(),
        );

        let service = ProfileService::new(ProfileRepository::new(db));

        let result = service.get_own("u1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_own_rejects_invalid_picture_url() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = ProfileService::new(ProfileRepository::new(db));

        let result = service
            .update_own(
                "u1",
                UpdateProfileInput {
                    bio: None,
                    profile_picture: Some("not a url".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

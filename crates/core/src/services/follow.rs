//! Follow service.

use std::collections::HashMap;

use sea_orm::Set;
use wren_common::{AppError, AppResult, IdGenerator};
use wren_db::{
    entities::follow,
    repositories::{FollowRepository, UserRepository},
};

/// Follow service for business logic.
#[derive(Clone)]
pub struct FollowService {
    follow_repo: FollowRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Result of a follow request.
#[derive(Debug)]
pub struct FollowOutcome {
    /// The follow row, either freshly created or pre-existing.
    pub follow: follow::Model,
    /// Username of the user being followed.
    pub followee_username: String,
    /// Whether a new relationship was created by this request.
    pub created: bool,
}

impl FollowService {
    /// Create a new follow service.
    #[must_use]
    pub fn new(follow_repo: FollowRepository, user_repo: UserRepository) -> Self {
        Self {
            follow_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Follow a user by ID.
    ///
    /// Idempotent: following someone already followed returns the existing
    /// relationship with `created = false` instead of an error. A concurrent
    /// duplicate insert is absorbed the same way via the unique pair index.
    pub async fn follow(&self, follower_id: &str, followee_id: &str) -> AppResult<FollowOutcome> {
        if followee_id == follower_id {
            return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
        }

        let followee = self.user_repo.get_by_id(followee_id).await?;

        if let Some(existing) = self.follow_repo.find_by_pair(follower_id, &followee.id).await? {
            return Ok(FollowOutcome {
                follow: existing,
                followee_username: followee.username,
                created: false,
            });
        }

        let model = follow::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(follower_id.to_string()),
            followee_id: Set(followee.id.clone()),
            ..Default::default()
        };

        match self.follow_repo.create(model).await {
            Ok(created) => Ok(FollowOutcome {
                follow: created,
                followee_username: followee.username,
                created: true,
            }),
            // Lost the race against a concurrent identical request
            Err(AppError::Conflict(_)) => {
                let existing = self
                    .follow_repo
                    .find_by_pair(follower_id, &followee.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal("Follow row vanished after conflict".to_string())
                    })?;

                Ok(FollowOutcome {
                    follow: existing,
                    followee_username: followee.username,
                    created: false,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Remove a follow relationship owned by the given follower.
    ///
    /// A follow that does not exist and a follow owned by someone else are
    /// indistinguishable to the caller: both are reported as not found.
    pub async fn unfollow(&self, follower_id: &str, follow_id: &str) -> AppResult<()> {
        let follow = self
            .follow_repo
            .find_by_id(follow_id)
            .await?
            .filter(|f| f.follower_id == follower_id)
            .ok_or_else(|| AppError::FollowNotFound(follow_id.to_string()))?;

        self.follow_repo.delete(&follow.id).await
    }

    /// List the usernames the given user follows, in follow order.
    ///
    /// Resolves all followee usernames with a single batched lookup.
    pub async fn following_usernames(&self, follower_id: &str) -> AppResult<Vec<String>> {
        let follows = self.follow_repo.find_following(follower_id).await?;
        if follows.is_empty() {
            return Ok(Vec::new());
        }

        let followee_ids: Vec<String> = follows.iter().map(|f| f.followee_id.clone()).collect();
        let usernames: HashMap<String, String> = self
            .user_repo
            .find_by_ids(&followee_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(follows
            .into_iter()
            .filter_map(|f| usernames.get(&f.followee_id).cloned())
            .collect())
    }

    /// Delete follow relationships in bulk, returning the number removed.
    pub async fn bulk_unfollow(&self, ids: &[String]) -> AppResult<u64> {
        self.follow_repo.delete_many(ids).await
    }
}

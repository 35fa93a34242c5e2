//! Post service.

use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use wren_common::{config::PaginationConfig, AppError, AppResult, IdGenerator};
use wren_db::{
    entities::post,
    repositories::{FollowRepository, PostRepository},
};

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    follow_repo: FollowRepository,
    pagination: PaginationConfig,
    id_gen: IdGenerator,
}

/// Input for creating a new post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostInput {
    #[validate(length(min = 1, max = 3000))]
    pub content: String,

    #[validate(url)]
    pub media: Option<String>,

    pub media_type: Option<post::MediaType>,
}

/// Input for updating an existing post.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostInput {
    #[validate(length(min = 1, max = 3000))]
    pub content: Option<String>,

    #[validate(url)]
    pub media: Option<String>,

    pub media_type: Option<post::MediaType>,
}

/// A page of feed posts.
#[derive(Debug)]
pub struct FeedPage {
    /// Posts on this page, newest first.
    pub items: Vec<post::Model>,
    /// Total number of posts visible to the requester.
    pub total: u64,
    /// Page number (1-based).
    pub page: u64,
    /// Effective page size after clamping.
    pub page_size: u64,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub fn new(
        post_repo: PostRepository,
        follow_repo: FollowRepository,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            post_repo,
            follow_repo,
            pagination,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new post owned by the given user.
    pub async fn create(&self, user_id: &str, input: CreatePostInput) -> AppResult<post::Model> {
        input.validate()?;

        if input.content.trim().is_empty() {
            return Err(AppError::Validation(
                "Post content must not be blank".to_string(),
            ));
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            content: Set(input.content),
            media: Set(input.media),
            media_type: Set(input.media_type),
            ..Default::default()
        };

        self.post_repo.create(model).await
    }

    /// Get a post by ID.
    pub async fn get(&self, id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(id).await
    }

    /// Update a post. Only the owner may edit; the timestamp is immutable.
    pub async fn update(
        &self,
        user_id: &str,
        post_id: &str,
        input: UpdatePostInput,
    ) -> AppResult<post::Model> {
        input.validate()?;

        let post = self.post_repo.get_by_id(post_id).await?;
        if post.user_id != user_id {
            return Err(AppError::Forbidden("You do not own this post".to_string()));
        }

        if let Some(ref content) = input.content {
            if content.trim().is_empty() {
                return Err(AppError::Validation(
                    "Post content must not be blank".to_string(),
                ));
            }
        }

        let mut active: post::ActiveModel = post.into();
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(media) = input.media {
            active.media = Set(Some(media));
        }
        if let Some(media_type) = input.media_type {
            active.media_type = Set(Some(media_type));
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.post_repo.update(active).await
    }

    /// Delete a post. Only the owner may delete.
    pub async fn delete(&self, user_id: &str, post_id: &str) -> AppResult<()> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.user_id != user_id {
            return Err(AppError::Forbidden("You do not own this post".to_string()));
        }

        self.post_repo.delete(post_id).await
    }

    /// List the feed for a user: posts by users they follow, newest first.
    ///
    /// `page` is 1-based. A missing `page_size` falls back to the configured
    /// default; an oversized one is clamped to the configured maximum.
    pub async fn feed(
        &self,
        user_id: &str,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> AppResult<FeedPage> {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(self.pagination.default_page_size)
            .clamp(1, self.pagination.max_page_size);

        let author_ids = self.follow_repo.followee_ids(user_id).await?;

        // page comes straight from the query string, so keep the math saturating
        let offset = page.saturating_sub(1).saturating_mul(page_size);
        let items = self.post_repo.find_feed(&author_ids, page_size, offset).await?;
        let total = self.post_repo.count_feed(&author_ids).await?;

        Ok(FeedPage {
            items,
            total,
            page,
            page_size,
        })
    }
}

//! Business logic services.

#![allow(missing_docs)]

pub mod follow;
pub mod post;
pub mod profile;
pub mod user;

pub use follow::{FollowOutcome, FollowService};
pub use post::{CreatePostInput, FeedPage, PostService, UpdatePostInput};
pub use profile::{ProfileService, UpdateProfileInput};
pub use user::{CreateUserInput, UserService};

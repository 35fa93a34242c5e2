//! Database repositories.

pub mod follow;
pub mod post;
pub mod profile;
pub mod user;

pub use follow::FollowRepository;
pub use post::PostRepository;
pub use profile::ProfileRepository;
pub use user::UserRepository;

//! Database entities.

pub mod follow;
pub mod post;
pub mod profile;
pub mod user;

pub use follow::Entity as Follow;
pub use post::Entity as Post;
pub use profile::Entity as Profile;
pub use user::Entity as User;

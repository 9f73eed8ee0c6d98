//! Domain layer - Core entities, joined views and value objects.
//!
//! Pure types with no infrastructure dependencies. Repositories in
//! `social-service` persist these and assemble the joined views.

pub mod constants;
pub mod error;
pub mod password;
pub mod post;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use post::{NewPost, Post, PostChanges, PostWithUser};
pub use user::{NewUser, User, UserWithPosts};

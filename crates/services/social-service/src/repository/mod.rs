//! Repository layer for data access.
//!
//! `UserStore` owns user records, `PostStore` owns post records and leans on
//! a `UserRepository` for owner checks. `Storage` bundles both behind one
//! handle.

pub mod entities;
mod post_repository;
mod storage;
mod user_repository;

pub use post_repository::{PostRepository, PostStore};
pub use storage::Storage;
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use post_repository::MockPostRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

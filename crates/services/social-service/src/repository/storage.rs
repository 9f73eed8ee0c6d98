//! Storage facade.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{PostRepository, PostStore, UserRepository, UserStore};

/// Both repositories behind one cloneable handle, built once at startup.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl Storage {
    /// Assemble storage from already-built repositories.
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { users, posts }
    }

    /// Build both stores over a shared connection pool.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.clone()));
        let posts = Arc::new(PostStore::new(db, users.clone()));

        Self { users, posts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockPostRepository, MockUserRepository};
    use common::AppError;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_storage_delegates_to_repositories() {
        let mut users = MockUserRepository::new();
        users.expect_get_posts_count().returning(|_| Ok(3));

        let mut posts = MockPostRepository::new();
        posts
            .expect_delete()
            .returning(|_, _| Err(AppError::NotFound));

        let storage = Storage::new(Arc::new(users), Arc::new(posts));

        assert_eq!(storage.users.get_posts_count(Uuid::new_v4()).await.unwrap(), 3);
        assert!(matches!(
            storage.posts.delete(Uuid::new_v4(), Uuid::new_v4()).await,
            Err(AppError::NotFound)
        ));
    }
}

//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::{post, user, PostEntity, UserActiveModel, UserEntity};
use common::{AppError, AppResult, OptionExt};
use domain::{NewUser, Post, User, UserWithPosts};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user, assigning its id and timestamps.
    ///
    /// Fails with `Conflict` when the email or username is already taken.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Find user by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<User>;

    /// Find user by email address
    async fn get_by_email(&self, email: &str) -> AppResult<User>;

    /// Find user together with all of its posts, newest first
    async fn get_with_posts(&self, id: Uuid) -> AppResult<UserWithPosts>;

    /// Count posts owned by `id`. Does not check that the user exists.
    async fn get_posts_count(&self, id: Uuid) -> AppResult<u64>;

    /// Delete a user and every post it owns. Returns the number of posts removed.
    async fn delete(&self, id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn username_taken(&self, username: &str) -> AppResult<bool> {
        let existing = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(existing.is_some())
    }

    /// Remove the user row, then its posts, inside `txn`.
    async fn delete_cascade(txn: &DatabaseTransaction, id: Uuid) -> AppResult<u64> {
        let removed = UserEntity::delete_by_id(id).exec(txn).await?;
        if removed.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        let posts = PostEntity::delete_many()
            .filter(post::Column::UserId.eq(id))
            .exec(txn)
            .await?;

        Ok(posts.rows_affected)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        // Friendly pre-checks; the unique indexes close the race between
        // these reads and the insert.
        match self.get_by_email(&new_user.email).await {
            Ok(_) => return Err(AppError::conflict("Email")),
            Err(AppError::NotFound) => {}
            Err(e) => return Err(e),
        }
        if self.username_taken(&new_user.username).await? {
            return Err(AppError::conflict("Username"));
        }

        let now = Utc::now();
        let active_model = UserActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password: Set(new_user.password),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        tracing::debug!(user_id = %model.id, "User created");
        Ok(User::from(model))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn get_with_posts(&self, id: Uuid) -> AppResult<UserWithPosts> {
        let user = self.get_by_id(id).await?;

        let posts = PostEntity::find()
            .filter(post::Column::UserId.eq(id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Post::from)
            .collect();

        Ok(UserWithPosts { user, posts })
    }

    async fn get_posts_count(&self, id: Uuid) -> AppResult<u64> {
        let count = PostEntity::find()
            .filter(post::Column::UserId.eq(id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn delete(&self, id: Uuid) -> AppResult<u64> {
        let txn = self.db.begin().await?;

        match Self::delete_cascade(&txn, id).await {
            Ok(removed_posts) => {
                txn.commit().await?;
                tracing::info!(user_id = %id, removed_posts, "User deleted");
                Ok(removed_posts)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

//! Post repository implementation.
//!
//! Posts reference their owner by id only. The store enforces nothing about
//! that reference, so this repository does: creation requires an existing
//! owner, joined reads surface a missing owner as `NotFound`, and mutations
//! are single conditional writes matched on both post id and owner id.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use super::entities::{post, PostActiveModel, PostEntity, Tags, UserEntity};
use super::user_repository::UserRepository;
use common::{AppError, AppResult, OptionExt};
use domain::{NewPost, Post, PostChanges, PostWithUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a post owned by an existing user.
    ///
    /// Fails with `InvalidReference` when `user_id` names no user.
    async fn create(&self, new_post: NewPost) -> AppResult<Post>;

    /// Find post by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<Post>;

    /// All posts owned by `user_id`, newest first. Does not check the user.
    async fn get_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Post>>;

    /// Post joined with its owner. `NotFound` if either side is missing.
    async fn get_with_user(&self, id: Uuid) -> AppResult<PostWithUser>;

    /// Newest posts joined with their owners in one query.
    /// A `limit` of zero means no limit.
    async fn get_all_with_users(&self, limit: u64) -> AppResult<Vec<PostWithUser>>;

    /// Apply `changes` if `owner_id` owns the post, otherwise `NotFound`.
    async fn update(&self, id: Uuid, owner_id: Uuid, changes: PostChanges) -> AppResult<()>;

    /// Delete the post if `owner_id` owns it, otherwise `NotFound`.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of PostRepository
pub struct PostStore {
    db: DatabaseConnection,
    users: Arc<dyn UserRepository>,
}

impl PostStore {
    /// Create new repository instance.
    ///
    /// `users` resolves owners for creation checks and single-post joins.
    pub fn new(db: DatabaseConnection, users: Arc<dyn UserRepository>) -> Self {
        Self { db, users }
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn create(&self, new_post: NewPost) -> AppResult<Post> {
        match self.users.get_by_id(new_post.user_id).await {
            Ok(_) => {}
            Err(AppError::NotFound) => return Err(AppError::invalid_reference("User")),
            Err(e) => return Err(e),
        }

        let now = Utc::now();
        let active_model = PostActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_post.title),
            content: Set(new_post.content),
            user_id: Set(new_post.user_id),
            tags: Set(Tags(new_post.tags)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        tracing::debug!(post_id = %model.id, user_id = %model.user_id, "Post created");
        Ok(Post::from(model))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Post> {
        PostEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Post::from)
            .ok_or_not_found()
    }

    async fn get_by_user_id(&self, user_id: Uuid) -> AppResult<Vec<Post>> {
        let models = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Post::from).collect())
    }

    async fn get_with_user(&self, id: Uuid) -> AppResult<PostWithUser> {
        let post = self.get_by_id(id).await?;

        let user = self.users.get_by_id(post.user_id).await.map_err(|e| {
            if matches!(e, AppError::NotFound) {
                tracing::warn!(post_id = %post.id, user_id = %post.user_id, "Post references a missing user");
            }
            e
        })?;

        Ok(PostWithUser { post, user })
    }

    async fn get_all_with_users(&self, limit: u64) -> AppResult<Vec<PostWithUser>> {
        // Single join; posts whose owner is gone drop out of the inner join
        let mut query = PostEntity::find()
            .join(sea_orm::JoinType::InnerJoin, post::Relation::User.def())
            .select_also(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id);

        if limit > 0 {
            query = query.limit(limit);
        }

        let rows = query.all(&self.db).await?;

        Ok(rows
            .into_iter()
            .filter_map(|(post, user)| {
                user.map(|user| PostWithUser {
                    post: Post::from(post),
                    user: User::from(user),
                })
            })
            .collect())
    }

    async fn update(&self, id: Uuid, owner_id: Uuid, changes: PostChanges) -> AppResult<()> {
        let mut update = PostEntity::update_many()
            .col_expr(post::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::UserId.eq(owner_id));

        if let Some(title) = changes.title {
            update = update.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(content) = changes.content {
            update = update.col_expr(post::Column::Content, Expr::value(content));
        }
        if let Some(tags) = changes.tags {
            update = update.col_expr(post::Column::Tags, Expr::value(Tags(tags)));
        }

        let result = update.exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        let result = PostEntity::delete_many()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::UserId.eq(owner_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }
}

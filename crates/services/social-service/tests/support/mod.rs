//! Test support shared by the integration tests.
//!
//! Each test gets its own in-memory SQLite database with the real migrations
//! applied. The pool is pinned to one connection because every SQLite memory
//! connection is a separate database.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sea_orm::{sea_query::Expr, ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use common::DatabaseConfig;
use domain::{NewPost, NewUser, Post, User};
use social_service_lib::infra::Database;
use social_service_lib::repository::entities::{post, PostEntity};
use social_service_lib::repository::Storage;

pub fn memory_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        max_idle_secs: 600,
        connect_timeout_secs: 5,
    }
}

pub async fn setup() -> (Database, Storage) {
    let database = Database::connect(&memory_config())
        .await
        .expect("in-memory database");
    let storage = Storage::from_connection(database.get_connection());
    (database, storage)
}

pub fn new_user(username: &str, email: &str) -> NewUser {
    NewUser::new(username, email, "not-a-real-hash")
}

pub fn new_post(user_id: Uuid, title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: format!("{} body", title),
        user_id,
        tags: vec!["test".to_string()],
    }
}

pub async fn create_user(storage: &Storage, username: &str, email: &str) -> User {
    storage
        .users
        .create(new_user(username, email))
        .await
        .expect("create user")
}

pub async fn create_post(storage: &Storage, user_id: Uuid, title: &str) -> Post {
    storage
        .posts
        .create(new_post(user_id, title))
        .await
        .expect("create post")
}

/// Pin a post's creation time so ordering does not depend on the clock
pub async fn set_created_at(database: &Database, post_id: Uuid, at: DateTime<Utc>) {
    PostEntity::update_many()
        .col_expr(post::Column::CreatedAt, Expr::value(at))
        .filter(post::Column::Id.eq(post_id))
        .exec(database.connection())
        .await
        .expect("backdate post");
}

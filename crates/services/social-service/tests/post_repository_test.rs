//! PostStore integration tests against in-memory SQLite.

mod support;

use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use common::AppError;
use domain::{NewPost, PostChanges};
use social_service_lib::repository::entities::{user, UserEntity};

use support::{create_post, create_user, new_post, set_created_at, setup};

#[tokio::test]
async fn test_create_then_get_by_id() {
    let (_db, storage) = setup().await;
    let alice = create_user(&storage, "alice", "a@x.com").await;

    let created = storage
        .posts
        .create(NewPost {
            title: "Hello".to_string(),
            content: "First post".to_string(),
            user_id: alice.id,
            tags: vec!["rust".to_string(), "intro".to_string()],
        })
        .await
        .unwrap();

    assert!(!created.id.is_nil());
    assert_eq!(created.user_id, alice.id);
    assert_eq!(created.tags, vec!["rust", "intro"]);

    let fetched = storage.posts.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_for_unknown_user_is_invalid_reference() {
    let (_db, storage) = setup().await;

    let result = storage.posts.create(new_post(Uuid::new_v4(), "orphan")).await;
    assert!(matches!(result, Err(AppError::InvalidReference(entity)) if entity == "User"));
}

#[tokio::test]
async fn test_get_by_user_id_scenario() {
    let (db, storage) = setup().await;
    let u1 = create_user(&storage, "u1", "a@x.com").await;
    let u2 = create_user(&storage, "u2", "b@x.com").await;
    let p1 = create_post(&storage, u1.id, "P1").await;
    let p2 = create_post(&storage, u2.id, "P2").await;

    // P2 carries an earlier timestamp than P1
    set_created_at(&db, p2.id, p1.created_at - Duration::minutes(5)).await;

    let u1_posts = storage.posts.get_by_user_id(u1.id).await.unwrap();
    assert_eq!(u1_posts, vec![p1.clone()]);

    let feed = storage.posts.get_all_with_users(0).await.unwrap();
    let ids: Vec<Uuid> = feed.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![p1.id, p2.id]);
    assert_eq!(feed[0].user.email, "a@x.com");
    assert_eq!(feed[1].user.email, "b@x.com");
}

#[tokio::test]
async fn test_get_by_user_id_unknown_user_is_empty() {
    let (_db, storage) = setup().await;

    let posts = storage.posts.get_by_user_id(Uuid::new_v4()).await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_feed_limit_newest_first_with_owners() {
    let (db, storage) = setup().await;
    let alice = create_user(&storage, "alice", "a@x.com").await;
    let bob = create_user(&storage, "bob", "b@x.com").await;

    let oldest = create_post(&storage, alice.id, "oldest").await;
    let middle = create_post(&storage, bob.id, "middle").await;
    let newest = create_post(&storage, alice.id, "newest").await;

    let now = Utc::now();
    set_created_at(&db, oldest.id, now - Duration::hours(3)).await;
    set_created_at(&db, middle.id, now - Duration::hours(2)).await;
    set_created_at(&db, newest.id, now - Duration::hours(1)).await;

    let feed = storage.posts.get_all_with_users(2).await.unwrap();
    assert_eq!(feed.len(), 2);

    assert_eq!(feed[0].post.id, newest.id);
    assert_eq!(feed[0].user.id, alice.id);
    assert_eq!(feed[0].user.username, "alice");

    assert_eq!(feed[1].post.id, middle.id);
    assert_eq!(feed[1].user.id, bob.id);
    assert_eq!(feed[1].user.username, "bob");
}

#[tokio::test]
async fn test_get_with_user() {
    let (_db, storage) = setup().await;
    let alice = create_user(&storage, "alice", "a@x.com").await;
    let post = create_post(&storage, alice.id, "hello").await;

    let joined = storage.posts.get_with_user(post.id).await.unwrap();
    assert_eq!(joined.post, post);
    assert_eq!(joined.user, alice);

    let missing = storage.posts.get_with_user(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_dangling_owner() {
    let (db, storage) = setup().await;
    let alice = create_user(&storage, "alice", "a@x.com").await;
    let bob = create_user(&storage, "bob", "b@x.com").await;
    let orphan = create_post(&storage, alice.id, "orphan").await;
    let kept = create_post(&storage, bob.id, "kept").await;

    // Remove the user row directly, bypassing the cascade
    UserEntity::delete_many()
        .filter(user::Column::Id.eq(alice.id))
        .exec(db.connection())
        .await
        .unwrap();

    // The post itself is still readable on its own
    assert_eq!(storage.posts.get_by_id(orphan.id).await.unwrap(), orphan);

    let joined = storage.posts.get_with_user(orphan.id).await;
    assert!(matches!(joined, Err(AppError::NotFound)));

    // The feed skips posts whose owner is gone
    let feed = storage.posts.get_all_with_users(0).await.unwrap();
    let ids: Vec<Uuid> = feed.iter().map(|p| p.post.id).collect();
    assert_eq!(ids, vec![kept.id]);
}

#[tokio::test]
async fn test_update_by_owner() {
    let (_db, storage) = setup().await;
    let alice = create_user(&storage, "alice", "a@x.com").await;
    let post = create_post(&storage, alice.id, "draft").await;

    storage
        .posts
        .update(
            post.id,
            alice.id,
            PostChanges {
                title: Some("final".to_string()),
                tags: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = storage.posts.get_by_id(post.id).await.unwrap();
    assert_eq!(updated.title, "final");
    assert_eq!(updated.content, post.content);
    assert!(updated.tags.is_empty());
    assert_eq!(updated.user_id, alice.id);
    assert_eq!(updated.created_at, post.created_at);
    assert!(updated.updated_at >= post.updated_at);
}

#[tokio::test]
async fn test_update_wrong_owner_is_not_found() {
    let (_db, storage) = setup().await;
    let alice = create_user(&storage, "alice", "a@x.com").await;
    let bob = create_user(&storage, "bob", "b@x.com").await;
    let post = create_post(&storage, alice.id, "mine").await;

    let result = storage
        .posts
        .update(
            post.id,
            bob.id,
            PostChanges {
                title: Some("stolen".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));

    // Same answer as for a post that does not exist
    let missing = storage
        .posts
        .update(Uuid::new_v4(), alice.id, PostChanges::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    assert_eq!(storage.posts.get_by_id(post.id).await.unwrap(), post);
}

#[tokio::test]
async fn test_delete_ownership() {
    let (_db, storage) = setup().await;
    let u1 = create_user(&storage, "u1", "a@x.com").await;
    let u2 = create_user(&storage, "u2", "b@x.com").await;
    let p1 = create_post(&storage, u1.id, "P1").await;

    let wrong = storage.posts.delete(p1.id, u2.id).await;
    assert!(matches!(wrong, Err(AppError::NotFound)));
    assert_eq!(storage.posts.get_by_id(p1.id).await.unwrap(), p1);

    storage.posts.delete(p1.id, u1.id).await.unwrap();
    let gone = storage.posts.get_by_id(p1.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    let again = storage.posts.delete(p1.id, u1.id).await;
    assert!(matches!(again, Err(AppError::NotFound)));
}

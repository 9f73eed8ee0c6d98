//! Post handlers.
//!
//! Mutations are scoped to the acting owner named by the `X-User-Id` header.
//! A post owned by someone else answers exactly like a missing post.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{
    tags_are_valid, NewPost, Post, PostChanges, PostWithUser, MAX_TAGS_PER_POST, MAX_TAG_LENGTH,
};

use crate::api::extractors::{OwnerId, ValidatedJson};
use crate::api::AppState;
use crate::config::MAX_FEED_LIMIT;

/// Post creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[schema(example = "Hello", max_length = 200)]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    #[schema(example = "First post", max_length = 5000)]
    pub content: String,
    /// Owning user; must exist
    pub user_id: Uuid,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial post update. Only present fields change.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        PostChanges {
            title: req.title,
            content: req.content,
            tags: req.tags,
        }
    }
}

/// Feed query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Maximum posts to return. 0 means no limit, values above 100 are clamped.
    pub limit: Option<u64>,
}

/// Newest posts joined with their owners
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeedResponse {
    pub posts: Vec<PostWithUser>,
    pub count: usize,
}

/// Create post routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_feed).post(create_post))
        .route("/:id", get(get_post).patch(update_post).delete(delete_post))
        .route("/:id/user", get(get_post_with_user))
}

/// Create a post for an existing user
#[utoipa::path(
    post,
    path = "/v1/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Validation error"),
        (status = 422, description = "Owning user does not exist")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<Post>)> {
    if !tags_are_valid(&payload.tags) {
        return Err(invalid_tags());
    }

    let new_post = NewPost {
        title: payload.title,
        content: payload.content,
        user_id: payload.user_id,
        tags: payload.tags,
    };

    let post = state.run(state.storage.posts.create(new_post)).await?;
    tracing::info!(post_id = %post.id, user_id = %post.user_id, "Post created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// Get post by ID
#[utoipa::path(
    get,
    path = "/v1/posts/{id}",
    tag = "Posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = Post),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Post>> {
    let post = state.run(state.storage.posts.get_by_id(id)).await?;
    Ok(Json(post))
}

/// Get a post joined with its owner
#[utoipa::path(
    get,
    path = "/v1/posts/{id}/user",
    tag = "Posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post with owner", body = PostWithUser),
        (status = 404, description = "Post or owner not found")
    )
)]
pub async fn get_post_with_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostWithUser>> {
    let post = state.run(state.storage.posts.get_with_user(id)).await?;
    Ok(Json(post))
}

/// Newest posts across all users, each with its owner
#[utoipa::path(
    get,
    path = "/v1/posts",
    tag = "Posts",
    params(FeedQuery),
    responses(
        (status = 200, description = "Feed, newest first", body = FeedResponse)
    )
)]
pub async fn list_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> AppResult<Json<FeedResponse>> {
    let limit = feed_limit(query.limit, state.feed_default_limit());
    let posts = state
        .run(state.storage.posts.get_all_with_users(limit))
        .await?;

    Ok(Json(FeedResponse {
        count: posts.len(),
        posts,
    }))
}

/// Update a post owned by the acting user
#[utoipa::path(
    patch,
    path = "/v1/posts/{id}",
    tag = "Posts",
    params(
        ("id" = Uuid, Path, description = "Post ID"),
        ("X-User-Id" = Uuid, Header, description = "Acting owner")
    ),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Post not found or not owned by caller")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    OwnerId(owner_id): OwnerId,
    ValidatedJson(payload): ValidatedJson<UpdatePostRequest>,
) -> AppResult<Json<Post>> {
    if matches!(&payload.tags, Some(tags) if !tags_are_valid(tags)) {
        return Err(invalid_tags());
    }

    let changes = PostChanges::from(payload);
    if changes.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }

    let posts = &state.storage.posts;
    let post = state
        .run(async {
            posts.update(id, owner_id, changes).await?;
            posts.get_by_id(id).await
        })
        .await?;

    tracing::info!(post_id = %id, "Post updated");
    Ok(Json(post))
}

/// Delete a post owned by the acting user
#[utoipa::path(
    delete,
    path = "/v1/posts/{id}",
    tag = "Posts",
    params(
        ("id" = Uuid, Path, description = "Post ID"),
        ("X-User-Id" = Uuid, Header, description = "Acting owner")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found or not owned by caller")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    OwnerId(owner_id): OwnerId,
) -> AppResult<StatusCode> {
    state
        .run(state.storage.posts.delete(id, owner_id))
        .await?;

    tracing::info!(post_id = %id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn invalid_tags() -> AppError {
    AppError::validation(format!(
        "Tags must be non-empty, at most {} characters each and at most {} per post",
        MAX_TAG_LENGTH, MAX_TAGS_PER_POST
    ))
}

/// Resolve the requested feed size: absent uses the default, 0 is unlimited
fn feed_limit(requested: Option<u64>, default: u64) -> u64 {
    requested.unwrap_or(default).min(MAX_FEED_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_limit() {
        assert_eq!(feed_limit(None, 20), 20);
        assert_eq!(feed_limit(Some(5), 20), 5);
        assert_eq!(feed_limit(Some(0), 20), 0);
        assert_eq!(feed_limit(Some(1000), 20), MAX_FEED_LIMIT);
    }

    #[test]
    fn test_update_request_maps_to_changes() {
        let changes = PostChanges::from(UpdatePostRequest {
            title: Some("New".to_string()),
            ..Default::default()
        });
        assert_eq!(changes.title.as_deref(), Some("New"));
        assert!(changes.content.is_none());
        assert!(!changes.is_empty());
    }
}

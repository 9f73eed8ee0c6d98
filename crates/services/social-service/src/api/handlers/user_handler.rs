//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{NewUser, Password, Post, User, UserWithPosts};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    #[schema(example = "alice", min_length = 3, max_length = 20)]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Plain password, hashed before it is stored
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "hunter22", min_length = 6)]
    pub password: String,
}

/// Number of posts owned by a user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostsCountResponse {
    pub user_id: Uuid,
    pub count: u64,
}

/// Outcome of deleting a user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDeletedResponse {
    pub user_id: Uuid,
    pub deleted_posts: u64,
}

/// A user's posts as a flat list, newest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub count: usize,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user).delete(delete_user))
        .route("/:id/posts", get(get_user_with_posts))
        .route("/:id/posts/count", get(get_posts_count))
        .route("/:id/feed", get(list_user_posts))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or username already taken")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let password = Password::new(&payload.password)?;
    let new_user = NewUser::new(payload.username, payload.email, password);

    let user = state.run(state.storage.users.create(new_user)).await?;
    tracing::info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    let user = state.run(state.storage.users.get_by_id(id)).await?;
    Ok(Json(user))
}

/// Get a user together with all of its posts
#[utoipa::path(
    get,
    path = "/v1/users/{id}/posts",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User with posts, newest first", body = UserWithPosts),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_with_posts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserWithPosts>> {
    let user = state.run(state.storage.users.get_with_posts(id)).await?;
    Ok(Json(user))
}

/// Count a user's posts
///
/// The repository count is zero for unknown ids, so existence is checked
/// alongside it to keep "no posts" and "no user" apart.
#[utoipa::path(
    get,
    path = "/v1/users/{id}/posts/count",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Post count", body = PostsCountResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_posts_count(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostsCountResponse>> {
    let users = &state.storage.users;
    let (_, count) = state
        .run(async { tokio::try_join!(users.get_by_id(id), users.get_posts_count(id)) })
        .await?;

    Ok(Json(PostsCountResponse { user_id: id, count }))
}

/// List a user's posts without the user record
#[utoipa::path(
    get,
    path = "/v1/users/{id}/feed",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Posts, newest first", body = PostListResponse)
    )
)]
pub async fn list_user_posts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostListResponse>> {
    let posts = state.run(state.storage.posts.get_by_user_id(id)).await?;

    Ok(Json(PostListResponse {
        count: posts.len(),
        posts,
    }))
}

/// Delete a user and every post it owns
#[utoipa::path(
    delete,
    path = "/v1/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = UserDeletedResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserDeletedResponse>> {
    let deleted_posts = state.run(state.storage.users.delete(id)).await?;

    Ok(Json(UserDeletedResponse {
        user_id: id,
        deleted_posts,
    }))
}

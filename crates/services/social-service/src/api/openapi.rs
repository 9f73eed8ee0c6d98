//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::health_handler::{self, HealthResponse};
use crate::api::handlers::post_handler::{
    self, CreatePostRequest, FeedResponse, UpdatePostRequest,
};
use crate::api::handlers::user_handler::{
    self, CreateUserRequest, PostListResponse, PostsCountResponse, UserDeletedResponse,
};
use domain::{Post, PostWithUser, User, UserWithPosts};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Service",
        version = "0.1.0",
        description = "Users and their posts, backed by a relational store"
    ),
    paths(
        health_handler::health,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::get_user_with_posts,
        user_handler::get_posts_count,
        user_handler::list_user_posts,
        user_handler::delete_user,
        post_handler::create_post,
        post_handler::get_post,
        post_handler::get_post_with_user,
        post_handler::list_feed,
        post_handler::update_post,
        post_handler::delete_post,
    ),
    components(
        schemas(
            User,
            Post,
            PostWithUser,
            UserWithPosts,
            HealthResponse,
            CreateUserRequest,
            PostsCountResponse,
            UserDeletedResponse,
            PostListResponse,
            CreatePostRequest,
            UpdatePostRequest,
            FeedResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database connectivity"),
        (name = "Users", description = "User registration, lookup and removal"),
        (name = "Posts", description = "Posts, feed and owner-scoped edits"),
    )
)]
pub struct ApiDoc;

//! Data Transfer Objects - request/response types for the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to sign up a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub created_at: String,
}

/// A group's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A post as rendered in feeds and detail views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub text: String,
    pub pub_date: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A comment under a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author: String,
    pub text: String,
    pub created: String,
}

/// Payload for creating or editing a post. `group` is the group's slug;
/// `image` is the stored media path. The author never comes from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Payload for adding a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPayload {
    pub text: String,
}

/// One page of a feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<PostResponse>,
    pub page: u64,
    pub num_pages: u64,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Group page: the group plus one page of its posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFeedResponse {
    pub group: GroupResponse,
    pub posts: Vec<PostResponse>,
    pub page: u64,
    pub num_pages: u64,
    pub total: u64,
}

/// Profile page: the user, whether the viewer follows them, and one
/// page of their posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserResponse,
    pub following: bool,
    pub posts: Vec<PostResponse>,
    pub page: u64,
    pub num_pages: u64,
    pub total: u64,
}

/// Post detail page: the post, its author, and its comments newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub profile: UserResponse,
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// The post form as rendered for GET requests and failed submissions.
/// A failed submission comes back with HTTP 200 and non-empty
/// `form_errors`, mirroring the re-render-on-invalid convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormResponse {
    pub is_edit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostResponse>,
    #[serde(default)]
    pub form_errors: BTreeMap<String, Vec<String>>,
}

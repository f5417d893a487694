//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod feed;
mod group;
mod health;
mod posts;
mod profile;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use actix_web::{HttpResponse, http::header, web};
use serde::Deserialize;
use uuid::Uuid;

use yatube_core::access::Route;
use yatube_core::domain::{Group, Post, User};
use yatube_shared::dto::{GroupResponse, PostResponse, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
///
/// Literal prefixes are registered ahead of the `{username}` captures so
/// `/new/`, `/group/...` and `/follow/` never resolve as profiles.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup/", web::post().to(auth::signup))
            .route("/login/", web::post().to(auth::login)),
    )
    .route("/healthz", web::get().to(health::health_check))
    .route("/", web::get().to(feed::index))
    .route("/new/", web::get().to(posts::new_post_form))
    .route("/new/", web::post().to(posts::new_post))
    .route("/follow/", web::get().to(feed::follow_index))
    .route("/group/{slug}/", web::get().to(group::group_posts))
    .route("/{username}/follow/", web::get().to(profile::profile_follow))
    .route(
        "/{username}/unfollow/",
        web::get().to(profile::profile_unfollow),
    )
    .route("/{username}/", web::get().to(profile::profile))
    .route("/{username}/{post_id}/", web::get().to(posts::post_view))
    .route(
        "/{username}/{post_id}/edit/",
        web::get().to(posts::post_edit_form),
    )
    .route(
        "/{username}/{post_id}/edit/",
        web::post().to(posts::post_edit),
    )
    .route(
        "/{username}/{post_id}/comment/",
        web::post().to(comments::add_comment),
    );
}

/// `?page=` query parameter, shared by the paginated views. Kept as a
/// raw string: a non-numeric value means page 1, not a 400.
#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    pub page: Option<String>,
}

/// 302 redirect to a named route.
pub(crate) fn redirect(route: &Route) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, route.path()))
        .finish()
}

pub(crate) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

pub(crate) fn group_response(group: &Group) -> GroupResponse {
    GroupResponse {
        id: group.id,
        title: group.title.clone(),
        slug: group.slug.clone(),
        description: group.description.clone(),
    }
}

/// Render posts for a feed, batching the author and group lookups.
pub(crate) async fn render_posts(
    state: &AppState,
    posts: Vec<Post>,
) -> AppResult<Vec<PostResponse>> {
    let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let mut group_ids: Vec<Uuid> = posts.iter().filter_map(|p| p.group_id).collect();
    group_ids.sort_unstable();
    group_ids.dedup();

    let authors: HashMap<Uuid, String> = state
        .users
        .find_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let groups: HashMap<Uuid, GroupResponse> = state
        .groups
        .find_by_ids(&group_ids)
        .await?
        .into_iter()
        .map(|g| (g.id, group_response(&g)))
        .collect();

    Ok(posts
        .into_iter()
        .map(|post| PostResponse {
            id: post.id,
            text: post.text,
            pub_date: post.pub_date.to_rfc3339(),
            author: authors.get(&post.author_id).cloned().unwrap_or_default(),
            group: post.group_id.and_then(|id| groups.get(&id).cloned()),
            image: post.image,
        })
        .collect())
}

/// Resolve `/{username}/{post_id}/`: the user must exist and the post
/// must belong to them, otherwise the page does not exist.
pub(crate) async fn resolve_post(
    state: &AppState,
    username: &str,
    post_id: Uuid,
) -> AppResult<(User, Post)> {
    let profile = state
        .users
        .find_by_username(username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .filter(|p| p.author_id == profile.id)
        .ok_or_else(|| AppError::NotFound(format!("post '{post_id}' not found")))?;

    Ok((profile, post))
}

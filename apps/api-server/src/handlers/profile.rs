//! Profile handlers - profile feed, follow, unfollow.

use actix_web::{HttpResponse, web};

use yatube_core::access::{Route, WriteOutcome, authorize_follow};
use yatube_core::feed::{FeedScope, Page, PageRequest};
use yatube_shared::dto::ProfileResponse;

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::{PageQuery, redirect, render_posts, user_response};

/// GET /{username}/ - the user's posts plus whether the viewer follows
/// them (always false for anonymous viewers).
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let profile = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;

    let following = match viewer.0 {
        Some(viewer) => state.follows.is_following(viewer.user_id, profile.id).await?,
        None => false,
    };

    let scope = FeedScope::Profile {
        author_id: profile.id,
    };
    let page = state
        .posts
        .feed_page(&scope, PageRequest::parse(query.page.as_deref()))
        .await?;

    let Page {
        items,
        number,
        num_pages,
        total,
    } = page;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        profile: user_response(&profile),
        following,
        posts: render_posts(&state, items).await?,
        page: number,
        num_pages,
        total,
    }))
}

/// GET /{username}/follow/ - follow the author. Following yourself is
/// rejected with a redirect; following twice leaves a single edge.
pub async fn profile_follow(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    if let WriteOutcome::RedirectTo(route) = authorize_follow(&identity.username, &username) {
        return Ok(redirect(&route));
    }

    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;

    state.follows.follow(identity.user_id, author.id).await?;

    Ok(redirect(&Route::Profile { username }))
}

/// GET /{username}/unfollow/ - unfollow the author. Unfollowing someone
/// you don't follow is a no-op.
pub async fn profile_unfollow(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    if let WriteOutcome::RedirectTo(route) = authorize_follow(&identity.username, &username) {
        return Ok(redirect(&route));
    }

    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;

    state.follows.unfollow(identity.user_id, author.id).await?;

    Ok(redirect(&Route::Profile { username }))
}

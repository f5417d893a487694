//! Feed handlers - the global feed and the personalized follow feed.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use yatube_core::feed::{FeedScope, Page, PageRequest};
use yatube_shared::dto::FeedResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::render_posts;

/// `?q=` and `?page=` query parameters of the global feed. `page`
/// stays a raw string so a non-numeric value falls back to page 1.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub q: Option<String>,
    pub page: Option<String>,
}

/// GET / - all posts, newest first, optionally filtered by keyword.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    // An empty ?q= means no filter, same as no parameter at all.
    let keyword = query.q.clone().filter(|q| !q.is_empty());
    let scope = FeedScope::Global {
        keyword: keyword.clone(),
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

    Ok(HttpResponse::Ok().json(FeedResponse {
        posts: render_posts(&state, items).await?,
        page: number,
        num_pages,
        total,
        keyword,
    }))
}

/// GET /follow/ - posts by every author the viewer follows.
pub async fn follow_index(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<super::PageQuery>,
) -> AppResult<HttpResponse> {
    let scope = FeedScope::Following {
        viewer_id: identity.user_id,
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

    Ok(HttpResponse::Ok().json(FeedResponse {
        posts: render_posts(&state, items).await?,
        page: number,
        num_pages,
        total,
        keyword: None,
    }))
}

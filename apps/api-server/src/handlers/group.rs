//! Group feed handler.

use actix_web::{HttpResponse, web};

use yatube_core::feed::{FeedScope, Page, PageRequest};
use yatube_shared::dto::GroupFeedResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::{PageQuery, group_response, render_posts};

/// GET /group/{slug}/ - all posts of one group, newest first.
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("group '{slug}' not found")))?;

    let scope = FeedScope::Group { group_id: group.id };
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

    Ok(HttpResponse::Ok().json(GroupFeedResponse {
        group: group_response(&group),
        posts: render_posts(&state, items).await?,
        page: number,
        num_pages,
        total,
    }))
}

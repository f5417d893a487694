//! Post handlers - create, view, edit.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use yatube_core::access::{Route, WriteOutcome, authorize_edit};
use yatube_core::domain::Post;
use yatube_core::forms::{FieldErrors, validate_post_input};
use yatube_shared::dto::{PostDetailResponse, PostFormResponse, PostPayload};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::{redirect, render_posts, resolve_post, user_response};

/// GET /new/ - blank post form.
pub async fn new_post_form(_identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(PostFormResponse {
        is_edit: false,
        post: None,
        form_errors: Default::default(),
    }))
}

/// POST /new/ - create a post. The author is always the session user;
/// validation failure re-renders the form with HTTP 200.
pub async fn new_post(
    identity: Identity,
    state: web::Data<AppState>,
    payload: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();

    let group_id = match check_payload(&state, &payload).await? {
        Ok(group_id) => group_id,
        Err(form_errors) => {
            return Ok(HttpResponse::Ok().json(PostFormResponse {
                is_edit: false,
                post: None,
                form_errors: form_errors.into_map(),
            }));
        }
    };

    let post = Post::new(identity.user_id, payload.text, group_id, payload.image);
    state.posts.create(post).await?;

    tracing::debug!(author = %identity.username, "Post created");

    Ok(redirect(&Route::Index))
}

/// GET /{username}/{post_id}/ - single post with its comments.
pub async fn post_view(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> AppResult<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let (profile, post) = resolve_post(&state, &username, post_id).await?;

    let comments = state.comments.find_by_post(post.id).await?;
    let author_names: std::collections::HashMap<Uuid, String> = state
        .users
        .find_by_ids(&comments.iter().map(|c| c.author_id).collect::<Vec<_>>())
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let rendered_post = render_posts(&state, vec![post])
        .await?
        .pop()
        .ok_or_else(|| crate::middleware::error::AppError::Internal("post rendering".into()))?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        profile: user_response(&profile),
        post: rendered_post,
        comments: comments
            .into_iter()
            .map(|c| yatube_shared::dto::CommentResponse {
                id: c.id,
                author: author_names.get(&c.author_id).cloned().unwrap_or_default(),
                text: c.text,
                created: c.created.to_rfc3339(),
            })
            .collect(),
    }))
}

/// GET /{username}/{post_id}/edit/ - pre-filled edit form; non-authors
/// are sent to the post's read view.
pub async fn post_edit_form(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> AppResult<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let (profile, post) = resolve_post(&state, &username, post_id).await?;

    if let WriteOutcome::RedirectTo(route) = authorize_edit(identity.user_id, &post, &profile.username) {
        return Ok(redirect(&route));
    }

    let rendered = render_posts(&state, vec![post])
        .await?
        .pop()
        .ok_or_else(|| crate::middleware::error::AppError::Internal("post rendering".into()))?;

    Ok(HttpResponse::Ok().json(PostFormResponse {
        is_edit: true,
        post: Some(rendered),
        form_errors: Default::default(),
    }))
}

/// POST /{username}/{post_id}/edit/ - apply an edit. A non-author's
/// submission is silently dropped with a redirect to the read view.
pub async fn post_edit(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
    payload: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let (profile, mut post) = resolve_post(&state, &username, post_id).await?;

    if let WriteOutcome::RedirectTo(route) = authorize_edit(identity.user_id, &post, &profile.username) {
        return Ok(redirect(&route));
    }

    let payload = payload.into_inner();
    let group_id = match check_payload(&state, &payload).await? {
        Ok(group_id) => group_id,
        Err(form_errors) => {
            let rendered = render_posts(&state, vec![post])
                .await?
                .pop()
                .ok_or_else(|| crate::middleware::error::AppError::Internal("post rendering".into()))?;
            return Ok(HttpResponse::Ok().json(PostFormResponse {
                is_edit: true,
                post: Some(rendered),
                form_errors: form_errors.into_map(),
            }));
        }
    };

    post.edit(payload.text, group_id, payload.image);
    state.posts.update(post).await?;

    Ok(redirect(&Route::PostView {
        username: profile.username,
        post_id,
    }))
}

/// Validate the payload and resolve the optional group slug. An unknown
/// slug is a field error, not a 404: it arrived in the form body.
async fn check_payload(
    state: &AppState,
    payload: &PostPayload,
) -> AppResult<Result<Option<Uuid>, FieldErrors>> {
    let mut errors = validate_post_input(&payload.text, payload.image.as_deref());

    let mut group_id = None;
    if let Some(slug) = payload.group.as_deref().filter(|s| !s.is_empty()) {
        match state.groups.find_by_slug(slug).await? {
            Some(group) => group_id = Some(group.id),
            None => errors.add("group", "Select a valid choice."),
        }
    }

    if errors.is_empty() {
        Ok(Ok(group_id))
    } else {
        Ok(Err(errors))
    }
}

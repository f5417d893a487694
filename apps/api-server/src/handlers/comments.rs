//! Comment handler.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use yatube_core::access::Route;
use yatube_core::domain::Comment;
use yatube_core::forms::validate_comment_input;
use yatube_shared::dto::CommentPayload;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

use super::{redirect, resolve_post};

/// POST /{username}/{post_id}/comment/ - add a comment.
///
/// The response is a redirect to the post view whether or not the
/// comment validated; an invalid comment just persists nothing. Author
/// and target post come from the session and the path, never the body.
pub async fn add_comment(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
    payload: web::Json<CommentPayload>,
) -> AppResult<HttpResponse> {
    let (username, post_id) = path.into_inner();
    let (profile, post) = resolve_post(&state, &username, post_id).await?;

    let errors = validate_comment_input(&payload.text);
    if errors.is_empty() {
        let comment = Comment::new(post.id, identity.user_id, payload.text.clone());
        state.comments.create(comment).await?;
        tracing::debug!(author = %identity.username, post = %post.id, "Comment added");
    }

    Ok(redirect(&Route::PostView {
        username: profile.username,
        post_id,
    }))
}

//! Write authorization policy.
//!
//! Forbidden writes never surface as errors: the platform redirects the
//! actor to a safe read view instead. The policy result is a tagged
//! outcome so the HTTP layer can translate it without catching anything.

use uuid::Uuid;

use crate::domain::Post;

/// A route the platform can redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Login,
    Profile { username: String },
    PostView { username: String, post_id: Uuid },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Login => "/auth/login/".to_string(),
            Route::Profile { username } => format!("/{username}/"),
            Route::PostView { username, post_id } => format!("/{username}/{post_id}/"),
        }
    }
}

/// Outcome of a write authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Allowed,
    RedirectTo(Route),
}

/// Only the author may edit a post; anyone else is sent to the post's
/// read view.
pub fn authorize_edit(actor_id: Uuid, post: &Post, author_username: &str) -> WriteOutcome {
    if actor_id == post.author_id {
        WriteOutcome::Allowed
    } else {
        WriteOutcome::RedirectTo(Route::PostView {
            username: author_username.to_string(),
            post_id: post.id,
        })
    }
}

/// A user may not follow (or unfollow) themselves; the attempt bounces
/// back to the profile without touching the follow set.
pub fn authorize_follow(actor_username: &str, target_username: &str) -> WriteOutcome {
    if actor_username == target_username {
        WriteOutcome::RedirectTo(Route::Profile {
            username: target_username.to_string(),
        })
    } else {
        WriteOutcome::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_may_edit_own_post() {
        let author = Uuid::new_v4();
        let post = Post::new(author, "text".to_string(), None, None);

        assert_eq!(authorize_edit(author, &post, "leo"), WriteOutcome::Allowed);
    }

    #[test]
    fn non_author_is_redirected_to_post_view() {
        let post = Post::new(Uuid::new_v4(), "text".to_string(), None, None);

        let outcome = authorize_edit(Uuid::new_v4(), &post, "leo");

        assert_eq!(
            outcome,
            WriteOutcome::RedirectTo(Route::PostView {
                username: "leo".to_string(),
                post_id: post.id,
            })
        );
    }

    #[test]
    fn self_follow_is_rejected_with_redirect() {
        let outcome = authorize_follow("anna", "anna");

        assert_eq!(
            outcome,
            WriteOutcome::RedirectTo(Route::Profile {
                username: "anna".to_string(),
            })
        );
    }

    #[test]
    fn following_another_user_is_allowed() {
        assert_eq!(authorize_follow("anna", "leo"), WriteOutcome::Allowed);
    }

    #[test]
    fn route_paths() {
        let post_id = Uuid::new_v4();
        assert_eq!(Route::Login.path(), "/auth/login/");
        assert_eq!(
            Route::Profile {
                username: "leo".to_string()
            }
            .path(),
            "/leo/"
        );
        assert_eq!(
            Route::PostView {
                username: "leo".to_string(),
                post_id,
            }
            .path(),
            format!("/leo/{post_id}/")
        );
    }
}

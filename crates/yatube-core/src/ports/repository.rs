use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Group, Post, User};
use crate::error::RepoError;
use crate::feed::{FeedScope, Page, PageRequest};

/// User repository. Usernames are unique; there is no username update.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Batch lookup used when rendering feeds.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    async fn create(&self, user: User) -> Result<User, RepoError>;
}

/// Group repository. Slugs are unique and address groups in routes.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Group>, RepoError>;

    async fn create(&self, group: Group) -> Result<Group, RepoError>;
}

/// Post repository. Feeds are always ordered by publish timestamp,
/// newest first, and paginated at a fixed page size.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn create(&self, post: Post) -> Result<Post, RepoError>;

    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// One page of the feed selected by `scope`, clamped per
    /// [`PageRequest::resolve`].
    async fn feed_page(
        &self,
        scope: &FeedScope,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// All comments on a post, newest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Follow repository. Both writes are idempotent at the storage layer.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Insert-if-absent: a second follow of the same author is a no-op.
    async fn follow(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError>;

    /// Delete-if-exists: unfollowing a non-followed author is a no-op.
    async fn unfollow(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError>;

    async fn is_following(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RepoError>;
}

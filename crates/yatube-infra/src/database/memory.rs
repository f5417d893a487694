//! In-memory repository implementations.
//!
//! Used as the fallback when no database is configured, and as the
//! storage behind handler tests. Data is lost on process restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use yatube_core::domain::{Comment, Follow, Group, Post, User};
use yatube_core::error::RepoError;
use yatube_core::feed::{FeedScope, Page, PageRequest};
use yatube_core::ports::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, UserRepository,
};

/// Shared backing store - one instance stands in for the database, the
/// repository types below are views onto it.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    groups: RwLock<Vec<Group>>,
    posts: RwLock<Vec<Post>>,
    comments: RwLock<Vec<Comment>>,
    follows: RwLock<Vec<Follow>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already taken",
                user.username
            )));
        }
        users.push(user.clone());
        Ok(user)
    }
}

pub struct InMemoryGroupRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryGroupRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let groups = self.store.groups.read().await;
        Ok(groups.iter().find(|g| g.slug == slug).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Group>, RepoError> {
        let groups = self.store.groups.read().await;
        Ok(groups.iter().filter(|g| ids.contains(&g.id)).cloned().collect())
    }

    async fn create(&self, group: Group) -> Result<Group, RepoError> {
        let mut groups = self.store.groups.write().await;
        if groups.iter().any(|g| g.slug == group.slug) {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already taken",
                group.slug
            )));
        }
        groups.push(group.clone());
        Ok(group)
    }
}

pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.store.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn feed_page(
        &self,
        scope: &FeedScope,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let posts = self.store.posts.read().await;

        let mut selected: Vec<Post> = match scope {
            FeedScope::Global { keyword } => posts
                .iter()
                .filter(|p| {
                    keyword
                        .as_deref()
                        .is_none_or(|keyword| p.text.contains(keyword))
                })
                .cloned()
                .collect(),
            FeedScope::Group { group_id } => posts
                .iter()
                .filter(|p| p.group_id == Some(*group_id))
                .cloned()
                .collect(),
            FeedScope::Profile { author_id } => posts
                .iter()
                .filter(|p| p.author_id == *author_id)
                .cloned()
                .collect(),
            FeedScope::Following { viewer_id } => {
                let follows = self.store.follows.read().await;
                let followed: Vec<Uuid> = follows
                    .iter()
                    .filter(|f| f.user_id == *viewer_id)
                    .map(|f| f.author_id)
                    .collect();
                posts
                    .iter()
                    .filter(|p| followed.contains(&p.author_id))
                    .cloned()
                    .collect()
            }
        };

        selected.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

        let resolved = page.resolve(selected.len() as u64);
        let items = selected
            .into_iter()
            .skip(resolved.offset as usize)
            .take(resolved.limit as usize)
            .collect();

        Ok(Page::new(items, resolved))
    }
}

pub struct InMemoryCommentRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCommentRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.store.comments.write().await;
        comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let comments = self.store.comments.read().await;
        let mut selected: Vec<Comment> = comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(selected)
    }
}

pub struct InMemoryFollowRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryFollowRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FollowRepository for InMemoryFollowRepository {
    async fn follow(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError> {
        // Single write lock, so check-then-insert is atomic here.
        let mut follows = self.store.follows.write().await;
        let exists = follows
            .iter()
            .any(|f| f.user_id == user_id && f.author_id == author_id);
        if !exists {
            follows.push(Follow::new(user_id, author_id));
        }
        Ok(())
    }

    async fn unfollow(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError> {
        let mut follows = self.store.follows.write().await;
        follows.retain(|f| !(f.user_id == user_id && f.author_id == author_id));
        Ok(())
    }

    async fn is_following(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RepoError> {
        let follows = self.store.follows.read().await;
        Ok(follows
            .iter()
            .any(|f| f.user_id == user_id && f.author_id == author_id))
    }
}

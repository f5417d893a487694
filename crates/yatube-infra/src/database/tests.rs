#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use yatube_core::domain::{Post, User};
    use yatube_core::feed::{FeedScope, PageRequest};
    use yatube_core::ports::{FollowRepository, PostRepository, UserRepository};

    use crate::database::entity::post;
    use crate::database::memory::{
        InMemoryFollowRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
    };
    use crate::database::postgres::PostgresPostRepository;

    #[tokio::test]
    async fn test_find_post_by_id() {
        // Create mock database with expected query results
        let post_id = Uuid::new_v4();
        let author_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                text: "Test post".to_owned(),
                pub_date: now.into(),
                author_id,
                group_id: None,
                image: None,
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(std::sync::Arc::new(db));

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.text, "Test post");
        assert_eq!(found.id, post_id);
        assert_eq!(found.author_id, author_id);
    }

    #[tokio::test]
    async fn following_twice_keeps_one_edge() {
        let store = InMemoryStore::new();
        let follows = InMemoryFollowRepository::new(store.clone());
        let user = Uuid::new_v4();
        let author = Uuid::new_v4();

        follows.follow(user, author).await.unwrap();
        follows.follow(user, author).await.unwrap();

        assert!(follows.is_following(user, author).await.unwrap());

        follows.unfollow(user, author).await.unwrap();
        assert!(!follows.is_following(user, author).await.unwrap());
    }

    #[tokio::test]
    async fn unfollow_when_not_following_is_noop() {
        let store = InMemoryStore::new();
        let follows = InMemoryFollowRepository::new(store);

        let result = follows.unfollow(Uuid::new_v4(), Uuid::new_v4()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn feed_page_orders_newest_first_and_paginates() {
        let store = InMemoryStore::new();
        let posts = InMemoryPostRepository::new(store);
        let author = Uuid::new_v4();

        for n in 0..16 {
            posts
                .create(Post::new(author, format!("post {n}"), None, None))
                .await
                .unwrap();
        }

        let scope = FeedScope::Global { keyword: None };

        let first = posts
            .feed_page(&scope, PageRequest::new(Some(1)))
            .await
            .unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.num_pages, 2);
        assert_eq!(first.items[0].text, "post 15");

        let second = posts
            .feed_page(&scope, PageRequest::new(Some(2)))
            .await
            .unwrap();
        assert_eq!(second.items.len(), 6);
        assert_eq!(second.items[5].text, "post 0");
    }

    #[tokio::test]
    async fn keyword_filter_is_case_sensitive() {
        let store = InMemoryStore::new();
        let posts = InMemoryPostRepository::new(store);
        let author = Uuid::new_v4();

        posts
            .create(Post::new(author, "Rust is great".to_string(), None, None))
            .await
            .unwrap();
        posts
            .create(Post::new(author, "rust is lower".to_string(), None, None))
            .await
            .unwrap();

        let page = posts
            .feed_page(
                &FeedScope::Global {
                    keyword: Some("Rust".to_string()),
                },
                PageRequest::first(),
            )
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].text, "Rust is great");
    }

    #[tokio::test]
    async fn duplicate_username_is_a_constraint_violation() {
        let store = InMemoryStore::new();
        let users = InMemoryUserRepository::new(store);

        users
            .create(User::new("leo".to_string(), "hash".to_string()))
            .await
            .unwrap();
        let result = users
            .create(User::new("leo".to_string(), "hash".to_string()))
            .await;

        assert!(matches!(
            result,
            Err(yatube_core::error::RepoError::Constraint(_))
        ));
    }
}

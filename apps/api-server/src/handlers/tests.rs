//! Handler tests over the in-memory repositories.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use uuid::Uuid;

use yatube_core::domain::{Group, Post, User};
use yatube_core::ports::{PasswordService, TokenService};
use yatube_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use yatube_shared::dto::{
    AuthResponse, FeedResponse, GroupFeedResponse, PostDetailResponse, PostFormResponse,
    ProfileResponse,
};

use crate::state::AppState;

fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        expiration_hours: 1,
        issuer: "test-issuer".to_string(),
    }))
}

fn password_service() -> Arc<dyn PasswordService> {
    Arc::new(Argon2PasswordService::new())
}

macro_rules! test_app {
    ($state:expr, $tokens:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new($tokens.clone()))
                .app_data(web::Data::new(password_service()))
                .configure(super::configure_routes),
        )
        .await
    };
}

async fn seed_user(state: &AppState, username: &str) -> User {
    state
        .users
        .create(User::new(username.to_string(), "hash".to_string()))
        .await
        .unwrap()
}

async fn seed_post(state: &AppState, author: &User, text: &str, group_id: Option<Uuid>) -> Post {
    state
        .posts
        .create(Post::new(author.id, text.to_string(), group_id, None))
        .await
        .unwrap()
}

fn bearer(tokens: &Arc<dyn TokenService>, user: &User) -> (&'static str, String) {
    let token = tokens.generate_token(user.id, &user.username).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[actix_web::test]
async fn global_feed_paginates_sixteen_posts() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    for n in 0..16 {
        seed_post(&state, &author, &format!("post {n}"), None).await;
    }
    let app = test_app!(state, tokens);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: FeedResponse = test::read_body_json(resp).await;
    assert_eq!(body.posts.len(), 10);
    assert_eq!(body.num_pages, 2);
    assert_eq!(body.total, 16);
    assert_eq!(body.posts[0].text, "post 15");

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/?page=2").to_request()).await;
    let body: FeedResponse = test::read_body_json(resp).await;
    assert_eq!(body.posts.len(), 6);
    assert_eq!(body.posts[5].text, "post 0");
}

#[actix_web::test]
async fn out_of_range_page_clamps_to_last() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    for n in 0..16 {
        seed_post(&state, &author, &format!("post {n}"), None).await;
    }
    let app = test_app!(state, tokens);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/?page=99").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: FeedResponse = test::read_body_json(resp).await;
    assert_eq!(body.page, 2);
    assert_eq!(body.posts.len(), 6);
}

#[actix_web::test]
async fn non_numeric_page_falls_back_to_first() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    for n in 0..16 {
        seed_post(&state, &author, &format!("post {n}"), None).await;
    }
    let app = test_app!(state, tokens);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/?page=abc").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: FeedResponse = test::read_body_json(resp).await;
    assert_eq!(body.page, 1);
    assert_eq!(body.posts.len(), 10);
    assert_eq!(body.posts[0].text, "post 15");
}

#[actix_web::test]
async fn keyword_filters_global_feed() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    seed_post(&state, &author, "about Rust", None).await;
    seed_post(&state, &author, "about gardening", None).await;
    let app = test_app!(state, tokens);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/?q=Rust").to_request()).await;
    let body: FeedResponse = test::read_body_json(resp).await;
    assert_eq!(body.posts.len(), 1);
    assert_eq!(body.keyword.as_deref(), Some("Rust"));
    assert_eq!(body.posts[0].text, "about Rust");
}

#[actix_web::test]
async fn group_feed_contains_only_its_posts() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    let rust = state
        .groups
        .create(Group::new("Rust".into(), "rust".into(), None))
        .await
        .unwrap();
    let cats = state
        .groups
        .create(Group::new("Cats".into(), "cats".into(), None))
        .await
        .unwrap();
    seed_post(&state, &author, "in rust", Some(rust.id)).await;
    seed_post(&state, &author, "in cats", Some(cats.id)).await;
    seed_post(&state, &author, "no group", None).await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/group/rust/").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: GroupFeedResponse = test::read_body_json(resp).await;
    assert_eq!(body.group.slug, "rust");
    assert_eq!(body.posts.len(), 1);
    assert_eq!(body.posts[0].text, "in rust");
}

#[actix_web::test]
async fn unknown_group_slug_is_404() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/group/nope/").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn creating_post_requires_session() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new/")
            .set_json(serde_json::json!({ "text": "hello" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/auth/login/");

    let feed = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let body: FeedResponse = test::read_body_json(feed).await;
    assert_eq!(body.total, 0);
}

#[actix_web::test]
async fn creating_post_sets_author_from_session() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let user = seed_user(&state, "leo").await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new/")
            .insert_header(bearer(&tokens, &user))
            .set_json(serde_json::json!({ "text": "hello" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");

    let feed = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let body: FeedResponse = test::read_body_json(feed).await;
    assert_eq!(body.total, 1);
    assert_eq!(body.posts[0].author, "leo");
}

#[actix_web::test]
async fn empty_text_rerenders_form_without_persisting() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let user = seed_user(&state, "leo").await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new/")
            .insert_header(bearer(&tokens, &user))
            .set_json(serde_json::json!({ "text": "   " }))
            .to_request(),
    )
    .await;

    // Re-render convention: failed validation is a 200 with field errors.
    assert_eq!(resp.status(), StatusCode::OK);
    let body: PostFormResponse = test::read_body_json(resp).await;
    assert!(body.form_errors.contains_key("text"));

    let feed = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let body: FeedResponse = test::read_body_json(feed).await;
    assert_eq!(body.total, 0);
}

#[actix_web::test]
async fn unknown_group_in_payload_is_a_field_error() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let user = seed_user(&state, "leo").await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/new/")
            .insert_header(bearer(&tokens, &user))
            .set_json(serde_json::json!({ "text": "hello", "group": "nope" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: PostFormResponse = test::read_body_json(resp).await;
    assert!(body.form_errors.contains_key("group"));
}

#[actix_web::test]
async fn non_author_edit_redirects_without_changing_text() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    let intruder = seed_user(&state, "anna").await;
    let post = seed_post(&state, &author, "original", None).await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/leo/{}/edit/", post.id))
            .insert_header(bearer(&tokens, &intruder))
            .set_json(serde_json::json!({ "text": "hijacked" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/leo/{}/", post.id));

    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "original");
}

#[actix_web::test]
async fn author_edit_updates_text_and_redirects() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    let post = seed_post(&state, &author, "original", None).await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/leo/{}/edit/", post.id))
            .insert_header(bearer(&tokens, &author))
            .set_json(serde_json::json!({ "text": "revised" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/leo/{}/", post.id));

    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "revised");
    assert_eq!(stored.pub_date, post.pub_date);
}

#[actix_web::test]
async fn unauthenticated_comment_redirects_to_login() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    let post = seed_post(&state, &author, "post", None).await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/leo/{}/comment/", post.id))
            .set_json(serde_json::json!({ "text": "nice" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/auth/login/");

    let comments = state.comments.find_by_post(post.id).await.unwrap();
    assert!(comments.is_empty());
}

#[actix_web::test]
async fn comment_persists_and_redirects_to_post_view() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    let reader = seed_user(&state, "anna").await;
    let post = seed_post(&state, &author, "post", None).await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/leo/{}/comment/", post.id))
            .insert_header(bearer(&tokens, &reader))
            .set_json(serde_json::json!({ "text": "nice" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/leo/{}/", post.id));

    let view = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/leo/{}/", post.id))
            .to_request(),
    )
    .await;
    let body: PostDetailResponse = test::read_body_json(view).await;
    assert_eq!(body.comments.len(), 1);
    assert_eq!(body.comments[0].author, "anna");
}

#[actix_web::test]
async fn invalid_comment_still_redirects_but_persists_nothing() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    let reader = seed_user(&state, "anna").await;
    let post = seed_post(&state, &author, "post", None).await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/leo/{}/comment/", post.id))
            .insert_header(bearer(&tokens, &reader))
            .set_json(serde_json::json!({ "text": "" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/leo/{}/", post.id));
    assert!(state.comments.find_by_post(post.id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn following_twice_creates_one_edge() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let author = seed_user(&state, "leo").await;
    let reader = seed_user(&state, "anna").await;
    let app = test_app!(state, tokens);

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/leo/follow/")
                .insert_header(bearer(&tokens, &reader))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/leo/");
    }

    assert!(state.follows.is_following(reader.id, author.id).await.unwrap());

    // Profile shows the flag for the authenticated viewer.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/leo/")
            .insert_header(bearer(&tokens, &reader))
            .to_request(),
    )
    .await;
    let body: ProfileResponse = test::read_body_json(resp).await;
    assert!(body.following);
}

#[actix_web::test]
async fn self_follow_is_rejected() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let user = seed_user(&state, "anna").await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/anna/follow/")
            .insert_header(bearer(&tokens, &user))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/anna/");
    assert!(!state.follows.is_following(user.id, user.id).await.unwrap());
}

#[actix_web::test]
async fn unfollow_when_not_following_is_not_an_error() {
    let state = AppState::in_memory();
    let tokens = token_service();
    seed_user(&state, "leo").await;
    let reader = seed_user(&state, "anna").await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/leo/unfollow/")
            .insert_header(bearer(&tokens, &reader))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/leo/");
}

#[actix_web::test]
async fn follow_feed_tracks_followed_authors_only() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let leo = seed_user(&state, "leo").await;
    let other = seed_user(&state, "boris").await;
    let reader = seed_user(&state, "anna").await;
    seed_post(&state, &leo, "from leo", None).await;
    seed_post(&state, &other, "from boris", None).await;
    let app = test_app!(state, tokens);

    // Nothing followed yet: empty page, not an error.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/follow/")
            .insert_header(bearer(&tokens, &reader))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: FeedResponse = test::read_body_json(resp).await;
    assert_eq!(body.total, 0);

    state.follows.follow(reader.id, leo.id).await.unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/follow/")
            .insert_header(bearer(&tokens, &reader))
            .to_request(),
    )
    .await;
    let body: FeedResponse = test::read_body_json(resp).await;
    assert_eq!(body.total, 1);
    assert_eq!(body.posts[0].text, "from leo");
}

#[actix_web::test]
async fn post_under_wrong_username_is_404() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let leo = seed_user(&state, "leo").await;
    seed_user(&state, "anna").await;
    let post = seed_post(&state, &leo, "post", None).await;
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/anna/{}/", post.id))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unknown_profile_is_404() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = test_app!(state, tokens);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/ghost/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn signup_then_login() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/signup/")
            .set_json(serde_json::json!({ "username": "leo", "password": "secure-pass" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: AuthResponse = test::read_body_json(resp).await;
    assert!(!body.access_token.is_empty());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/")
            .set_json(serde_json::json!({ "username": "leo", "password": "secure-pass" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/")
            .set_json(serde_json::json!({ "username": "leo", "password": "wrong-pass" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn reserved_username_is_rejected() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = test_app!(state, tokens);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/signup/")
            .set_json(serde_json::json!({ "username": "follow", "password": "secure-pass" }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

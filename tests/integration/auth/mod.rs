//! Session endpoint integration tests
//!
//! - POST /api/auth/register
//! - POST /api/auth/login
//! - POST /api/auth/logout
//! - cookie and bearer session transport

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
};
use serde_json::json;
use xsslab_common::SameSitePolicy;

use crate::common::{request, TestApp};

mod test_register {
    use super::*;

    #[tokio::test]
    async fn test_register_sets_session_cookie() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .post_json(
                "/api/auth/register",
                json!({"username": "alice", "password": "password1", "name": "Alice"}),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["message"], "Registration successful");
        assert_eq!(response.body["user"]["username"], "alice");
        assert_eq!(response.body["user"]["name"], "Alice");
        assert!(response.body["user"]["uuid"].is_string());
        assert!(response.body["user"].get("password").is_none());

        let set_cookie = response.header("set-cookie").unwrap();
        assert!(set_cookie.starts_with("auth_token="));
        assert!(set_cookie.contains("Max-Age=604800"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(!set_cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_register_stores_digest_not_password() {
        let app = TestApp::new().await.unwrap();
        app.register("alice", "password1", "Alice").await;

        let (stored,): (String,) =
            sqlx::query_as("SELECT password FROM users WHERE username = 'alice'")
                .fetch_one(&app.pool)
                .await
                .unwrap();
        assert_eq!(
            stored,
            "0b14d501a594442a01c6859541bcb3e8164d183d32937b851835442f69d5c94e"
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let app = TestApp::new().await.unwrap();
        app.register("alice", "password1", "Alice").await;

        let response = app
            .post_json(
                "/api/auth/register",
                json!({"username": "alice", "password": "another1", "name": "Other"}),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.body["success"], false);
        assert_eq!(response.body["message"], "Username already exists");
        assert!(response.header("set-cookie").is_none());
    }

    #[tokio::test]
    async fn test_register_reports_all_field_errors() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .post_json(
                "/api/auth/register",
                json!({"username": "ab", "password": "12345", "name": "Alice"}),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body["message"],
            "Username must be at least 3 characters; Password must be at least 6 characters"
        );
    }

    #[tokio::test]
    async fn test_register_rejects_bad_username_charset() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .post_json(
                "/api/auth/register",
                json!({"username": "<img>", "password": "password1", "name": "X"}),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body["message"],
            "Username can only contain letters, numbers, underscores and hyphens"
        );
    }

    #[tokio::test]
    async fn test_register_malformed_body() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .send(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/auth/register")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["success"], false);
    }
}

mod test_login {
    use super::*;

    #[tokio::test]
    async fn test_login_issues_new_session() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;

        let response = app
            .post_json(
                "/api/auth/login",
                json!({"username": "alice", "password": "password1"}),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "Login successful");
        assert_eq!(response.body["user"]["uuid"], alice.uuid.as_str());
        assert_eq!(response.body["user"]["name"], "Alice");

        let cookie = response.session_cookie().unwrap();
        let me = app.get("/api/posts/my", Some(&cookie)).await;
        assert_eq!(me.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_records_last_login() {
        let app = TestApp::new().await.unwrap();
        app.register("alice", "password1", "Alice").await;

        let (before,): (Option<i64>,) =
            sqlx::query_as("SELECT last_login FROM users WHERE username = 'alice'")
                .fetch_one(&app.pool)
                .await
                .unwrap();
        assert_eq!(before, None);

        app.post_json(
            "/api/auth/login",
            json!({"username": "alice", "password": "password1"}),
            None,
        )
        .await;

        let (after,): (Option<i64>,) =
            sqlx::query_as("SELECT last_login FROM users WHERE username = 'alice'")
                .fetch_one(&app.pool)
                .await
                .unwrap();
        assert!(after.is_some());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let app = TestApp::new().await.unwrap();
        app.register("alice", "password1", "Alice").await;

        let wrong_password = app
            .post_json(
                "/api/auth/login",
                json!({"username": "alice", "password": "password2"}),
                None,
            )
            .await;
        let unknown_user = app
            .post_json(
                "/api/auth/login",
                json!({"username": "mallory", "password": "password1"}),
                None,
            )
            .await;

        for response in [wrong_password, unknown_user] {
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
            assert_eq!(response.body["message"], "Invalid username or password");
            assert!(response.header("set-cookie").is_none());
        }
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .post_json("/api/auth/login", json!({}), None)
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body["message"],
            "Username is required; Password is required"
        );
    }
}

mod test_logout {
    use super::*;

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let app = TestApp::new().await.unwrap();

        let response = app.post_json("/api/auth/logout", json!({}), None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["message"], "Logout successful");
        assert_eq!(
            response.header("set-cookie"),
            Some("auth_token=; Max-Age=0; Path=/; HttpOnly; SameSite=Lax")
        );
    }

    #[tokio::test]
    async fn test_cross_site_cookie_policy_applies_to_set_and_clear() {
        let app = TestApp::with_config(|c| c.with_cookie_same_site(SameSitePolicy::None))
            .await
            .unwrap();

        let alice = app
            .post_json(
                "/api/auth/register",
                json!({"username": "alice", "password": "password1", "name": "Alice"}),
                None,
            )
            .await;
        assert!(alice
            .header("set-cookie")
            .unwrap()
            .ends_with("SameSite=None; Secure"));

        let logout = app.post_json("/api/auth/logout", json!({}), None).await;
        assert_eq!(
            logout.header("set-cookie"),
            Some("auth_token=; Max-Age=0; Path=/; HttpOnly; SameSite=None; Secure")
        );
    }
}

mod test_session_transport {
    use super::*;

    #[tokio::test]
    async fn test_bearer_header_is_accepted() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;

        let response = app
            .send(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/comments/my")
                    .header(AUTHORIZATION, format!("Bearer {}", alice.token()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["comments"], json!([]));
    }

    #[tokio::test]
    async fn test_tampered_cookie_is_anonymous() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;

        let mut forged = alice.cookie.clone();
        let last = forged.pop().unwrap();
        forged.push(if last == 'A' { 'B' } else { 'A' });

        let response = app.get("/api/posts/my", Some(&forged)).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.body["message"],
            "You must be logged in to view your posts"
        );
    }

    #[tokio::test]
    async fn test_token_from_another_secret_is_rejected() {
        let app = TestApp::new().await.unwrap();
        let other = TestApp::with_config(|mut c| {
            c.jwt_secret = "some-other-secret".to_string();
            c
        })
        .await
        .unwrap();
        let alice = other.register("alice", "password1", "Alice").await;

        let response = app.get("/api/posts/my", Some(&alice.cookie)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_cookie_value_is_anonymous() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .send(request(
                Method::GET,
                "/api/comments/my",
                None,
                Some("auth_token="),
            ))
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.body["message"],
            "You must be logged in to view your comments"
        );
    }
}

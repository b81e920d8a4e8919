//! Post endpoint integration tests
//!
//! - POST /api/posts
//! - GET /api/posts
//! - GET /api/posts/my
//! - GET /api/posts/search
//! - GET /api/posts/{post_uuid}
//! - DELETE /api/posts (lab reset)

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::common::{request, TestApp};

fn titles(body: &Value) -> Vec<String> {
    let mut titles: Vec<String> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    titles
}

mod test_create_post {
    use super::*;

    #[tokio::test]
    async fn test_create_post_and_see_it_in_feed() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;

        let response = app
            .post_json(
                "/api/posts",
                json!({"title": "Hello World", "content": "First post"}),
                Some(&alice.cookie),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        let post = &response.body["post"];
        assert_eq!(post["title"], "Hello World");
        assert_eq!(post["content"], "First post");
        assert_eq!(post["user_uuid"], alice.uuid.as_str());
        assert_eq!(post["username"], "alice");
        assert_eq!(post["user_name"], "Alice");
        assert!(post["time_create"].is_i64());

        let feed = app.get("/api/posts", None).await;
        assert_eq!(feed.status, StatusCode::OK);
        assert_eq!(feed.body["success"], true);
        assert_eq!(feed.body["posts"][0]["post_uuid"], post["post_uuid"]);
    }

    #[tokio::test]
    async fn test_create_post_requires_session() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .post_json(
                "/api/posts",
                json!({"title": "Hello", "content": "World"}),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["success"], false);
        assert_eq!(
            response.body["message"],
            "You must be logged in to create a post"
        );
    }

    #[tokio::test]
    async fn test_session_is_checked_before_body() {
        let app = TestApp::new().await.unwrap();

        let response = app.post_json("/api/posts", json!({}), None).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_post_validation() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;

        let response = app
            .post_json(
                "/api/posts",
                json!({"title": "t".repeat(201), "content": ""}),
                Some(&alice.cookie),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body["message"],
            "Title must be at most 200 characters; Content is required; Content cannot be empty"
        );
    }

    #[tokio::test]
    async fn test_markup_is_stored_verbatim() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        let payload = "<script>alert(document.cookie)</script>";

        let post_uuid = app.create_post(&alice, "xss", payload).await;

        let response = app.get(&format!("/api/posts/{post_uuid}"), None).await;
        assert_eq!(response.body["post"]["content"], payload);
    }
}

mod test_list_posts {
    use super::*;

    #[tokio::test]
    async fn test_feed_pagination() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        for n in 0..3 {
            app.create_post(&alice, &format!("post {n}"), "body").await;
        }

        let all = app.get("/api/posts", None).await;
        assert_eq!(all.body["posts"].as_array().unwrap().len(), 3);

        let first = app.get("/api/posts?limit=1", None).await;
        assert_eq!(first.body["posts"].as_array().unwrap().len(), 1);

        let rest = app.get("/api/posts?limit=10&offset=1", None).await;
        assert_eq!(rest.body["posts"].as_array().unwrap().len(), 2);

        let junk = app.get("/api/posts?limit=abc&offset=xyz", None).await;
        assert_eq!(junk.status, StatusCode::OK);
        assert_eq!(junk.body["posts"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_repeated_query_parameter_uses_first_value() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        for n in 0..3 {
            app.create_post(&alice, &format!("post {n}"), "body").await;
        }

        let response = app.get("/api/posts?limit=1&limit=2", None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["posts"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_limit_reads_integer_prefix() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        for n in 0..3 {
            app.create_post(&alice, &format!("post {n}"), "body").await;
        }

        let response = app.get("/api/posts?limit=2abc", None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["posts"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_my_posts_only_returns_own() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        let bob = app.register("bob", "password2", "Bob").await;
        app.create_post(&alice, "from alice", "a").await;
        app.create_post(&bob, "from bob", "b").await;

        let mine = app.get("/api/posts/my", Some(&alice.cookie)).await;

        assert_eq!(mine.status, StatusCode::OK);
        assert_eq!(titles(&mine.body), vec!["from alice"]);
    }

    #[tokio::test]
    async fn test_my_posts_requires_session() {
        let app = TestApp::new().await.unwrap();

        let response = app.get("/api/posts/my", None).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.body["message"],
            "You must be logged in to view your posts"
        );
    }
}

mod test_search_posts {
    use super::*;

    #[tokio::test]
    async fn test_search_matches_substring() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        app.create_post(&alice, "Hello World", "greeting").await;
        app.create_post(&alice, "Goodbye", "farewell").await;

        let response = app.get("/api/posts/search?q=Hello", None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(titles(&response.body), vec!["Hello World"]);
    }

    #[tokio::test]
    async fn test_search_covers_content() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        app.create_post(&alice, "One", "needle inside").await;
        app.create_post(&alice, "Two", "nothing here").await;

        let response = app.get("/api/posts/search?q=needle", None).await;

        assert_eq!(titles(&response.body), vec!["One"]);
    }

    #[tokio::test]
    async fn test_search_repeated_query_uses_first_value() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        app.create_post(&alice, "Hello World", "greeting").await;
        app.create_post(&alice, "Goodbye", "farewell").await;

        let response = app.get("/api/posts/search?q=Hello&q=Goodbye", None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(titles(&response.body), vec!["Hello World"]);
    }

    #[tokio::test]
    async fn test_search_without_query_is_rejected() {
        let app = TestApp::new().await.unwrap();

        for uri in ["/api/posts/search", "/api/posts/search?q="] {
            let response = app.get(uri, None).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(response.body["message"]
                .as_str()
                .unwrap()
                .starts_with("Search query is required"));
        }
    }

    #[tokio::test]
    async fn test_search_query_too_long() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .get(&format!("/api/posts/search?q={}", "a".repeat(101)), None)
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body["message"],
            "Search query must be at most 100 characters"
        );
    }
}

mod test_get_post {
    use super::*;

    #[tokio::test]
    async fn test_get_post_by_uuid() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        let post_uuid = app.create_post(&alice, "Hello", "World").await;

        let response = app.get(&format!("/api/posts/{post_uuid}"), None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["post"]["post_uuid"], post_uuid.as_str());
        assert_eq!(response.body["post"]["username"], "alice");
    }

    #[tokio::test]
    async fn test_unknown_post() {
        let app = TestApp::new().await.unwrap();

        let response = app
            .get("/api/posts/00000000-0000-4000-8000-000000000000", None)
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["message"], "Post not found");
    }

    #[tokio::test]
    async fn test_id_outside_charset_is_unknown_route() {
        let app = TestApp::new().await.unwrap();

        let response = app.get("/api/posts/not_an_id", None).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["message"], "Endpoint not found");
    }
}

mod test_lab_reset {
    use super::*;

    #[tokio::test]
    async fn test_reset_route_absent_by_default() {
        let app = TestApp::new().await.unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        app.create_post(&alice, "keep me", "x").await;

        let response = app
            .send(request(Method::DELETE, "/api/posts", None, None))
            .await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["message"], "Endpoint not found");

        let feed = app.get("/api/posts", None).await;
        assert_eq!(feed.body["posts"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_wipes_posts_and_comments() {
        let app = TestApp::with_config(|c| c.with_lab_reset_endpoint(true))
            .await
            .unwrap();
        let alice = app.register("alice", "password1", "Alice").await;
        let post_uuid = app.create_post(&alice, "one", "x").await;
        app.create_post(&alice, "two", "y").await;
        app.post_json(
            "/api/comments",
            json!({"content": "hi", "post_uuid": post_uuid}),
            Some(&alice.cookie),
        )
        .await;

        let response = app
            .send(request(Method::DELETE, "/api/posts", None, None))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["deleted_posts"], 2);
        assert_eq!(response.body["deleted_comments"], "all");
        assert_eq!(
            response.body["message"],
            "Successfully deleted all posts and comments"
        );

        let feed = app.get("/api/posts", None).await;
        assert_eq!(feed.body["posts"], json!([]));
        let comments = app.get("/api/comments/my", Some(&alice.cookie)).await;
        assert_eq!(comments.body["comments"], json!([]));
    }
}

//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error_code, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/healthz").await.expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_create_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserRequest::unique("F").at(51.5, -0.12);

    let response = server.post("/user/create", &request).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(body["email"], request.email.as_str());
    assert_eq!(body["gender"], "F");
    assert_eq!(body["location_lat"], 51.5);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserRequest::unique("M");

    server.post("/user/create", &request).await.unwrap();

    let response = server.post("/user/create", &request).await.unwrap();
    let code = assert_error_code(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_create_user_invalid_input() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = CreateUserRequest::unique("X");
    request.dob = "05/05/1995".to_string();

    let response = server.post("/user/create", &request).await.unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserRequest::unique("F");
    server.post("/user/create", &request).await.unwrap();

    let response = server
        .post("/login", &LoginRequest::from_create(&request))
        .await
        .unwrap();
    let token: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!token.token.is_empty());
    assert!(token.expires > 0);
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserRequest::unique("F");
    server.post("/user/create", &request).await.unwrap();

    let mut login = LoginRequest::from_create(&request);
    login.password = "wrong".to_string();

    let response = server.post("/login", &login).await.unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_unknown_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login = LoginRequest {
        email: unique_email("nobody"),
        password: "whatever".to_string(),
    };

    let response = server.post("/login", &login).await.unwrap();
    let code = assert_error_code(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_EMAIL");
}

#[tokio::test]
async fn test_logout_revokes_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server
        .register_and_login(&CreateUserRequest::unique("M"))
        .await
        .unwrap();

    let response = server.get_auth("/discover", &token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post_auth_empty("/logout", &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth("/discover", &token).await.unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "SESSION_REVOKED");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/discover").await.unwrap();
    let code = assert_error_code(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server.get_auth("/discover", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Swipe Tests
// ============================================================================

#[tokio::test]
async fn test_mutual_swipe_creates_match() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (alice, alice_token) = server
        .register_and_login(&CreateUserRequest::unique("F"))
        .await
        .unwrap();
    let (bob, bob_token) = server
        .register_and_login(&CreateUserRequest::unique("M"))
        .await
        .unwrap();

    let response = server
        .post_auth("/swipe", &alice_token, &SwipeRequest::yes(bob.id))
        .await
        .unwrap();
    let first: MatchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!first.matched);
    assert!(first.match_id.is_none());

    let response = server
        .post_auth("/swipe", &bob_token, &SwipeRequest::yes(alice.id))
        .await
        .unwrap();
    let second: MatchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(second.matched);
    let match_id = second.match_id.expect("match id");

    // Swiping again reports the same match
    let response = server
        .post_auth("/swipe", &alice_token, &SwipeRequest::yes(bob.id))
        .await
        .unwrap();
    let again: MatchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(again.match_id, Some(match_id));
}

#[tokio::test]
async fn test_concurrent_mutual_swipes_match_once() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (alice, alice_token) = server
        .register_and_login(&CreateUserRequest::unique("F"))
        .await
        .unwrap();
    let (bob, bob_token) = server
        .register_and_login(&CreateUserRequest::unique("M"))
        .await
        .unwrap();

    let alice_swipe = SwipeRequest::yes(bob.id);
    let bob_swipe = SwipeRequest::yes(alice.id);
    let (first, second) = tokio::join!(
        server.post_auth("/swipe", &alice_token, &alice_swipe),
        server.post_auth("/swipe", &bob_token, &bob_swipe),
    );
    let first: MatchResponse = assert_json(first.unwrap(), StatusCode::OK).await.unwrap();
    let second: MatchResponse = assert_json(second.unwrap(), StatusCode::OK).await.unwrap();

    assert!(first.matched || second.matched);
    if first.matched && second.matched {
        assert_eq!(first.match_id, second.match_id);
    }
}

#[tokio::test]
async fn test_swipe_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (me, token) = server
        .register_and_login(&CreateUserRequest::unique("M"))
        .await
        .unwrap();

    let response = server
        .post_auth("/swipe", &token, &SwipeRequest::yes(me.id))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CANNOT_SWIPE_SELF");

    let response = server
        .post_auth("/swipe", &token, &SwipeRequest::no(i64::MAX))
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_USER");

    let response = server
        .post_auth("/swipe", &token, &json!({"user_id": me.id, "preference": "maybe"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Discovery Tests
// ============================================================================

#[tokio::test]
async fn test_discover_excludes_swiped_and_filters() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = server
        .register_and_login(&CreateUserRequest::unique("M").at(10.0, 10.0))
        .await
        .unwrap();
    let (near, _) = server
        .register_and_login(&CreateUserRequest::unique("F").at(10.0, 10.01))
        .await
        .unwrap();
    let (passed, _) = server
        .register_and_login(&CreateUserRequest::unique("F").at(10.0, 10.02))
        .await
        .unwrap();

    let response = server
        .post_auth("/swipe", &token, &SwipeRequest::no(passed.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/discover?gender=F&min_age=18&max_age=120", &token)
        .await
        .unwrap();
    let results: Vec<DiscoveryResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(results.iter().all(|r| r.user.gender == "F"));
    assert!(results.iter().all(|r| (18..=120).contains(&r.user.age)));
    assert!(results.iter().all(|r| r.user.email.is_none()));
    assert!(results.iter().any(|r| r.user.id == near.id));
    assert!(!results.iter().any(|r| r.user.id == passed.id));

    // Ranked by distance
    for pair in results.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }

    let response = server
        .get_auth("/discover?gender=M", &token)
        .await
        .unwrap();
    let men: Vec<DiscoveryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!men.iter().any(|r| r.user.id == near.id));
}

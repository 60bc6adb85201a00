//! HTTP-level tests for session authentication and account administration.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, build_test_app, get, get_auth, post_json, send, ScriptedLlm};
use serde_json::json;

// ---------------------------------------------------------------------------
// Session extraction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_authorization_header_returns_401() {
    let test = build_test_app(ScriptedLlm::unavailable());

    let response = get(test.app(), "/api/v1/profile").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn non_bearer_scheme_returns_401() {
    let test = build_test_app(ScriptedLlm::unavailable());
    let (_user, token) = test.sign_in("ada@example.com", "Ada");

    let request = Request::builder()
        .uri("/api/v1/profile")
        .header("authorization", format!("Basic {token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(test.app(), request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_token_returns_401() {
    let test = build_test_app(ScriptedLlm::unavailable());

    let response = get_auth(test.app(), "/api/v1/progress", "not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
}

#[tokio::test]
async fn token_of_deleted_account_returns_401() {
    let test = build_test_app(ScriptedLlm::unavailable());
    let (_user, token) = test.sign_in("gone@example.com", "Gone");

    let response = post_json(
        test.app(),
        "/api/v1/delete-user",
        json!({ "email": "gone@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(test.app(), "/api/v1/profile", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Sign-up
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signup_requires_all_fields() {
    let test = build_test_app(ScriptedLlm::unavailable());

    let response = post_json(
        test.app(),
        "/api/v1/signup",
        json!({ "email": "ada@example.com", "password": "hunter22" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Email, password, and name are required"
    );
}

#[tokio::test]
async fn signup_rejects_malformed_email() {
    let test = build_test_app(ScriptedLlm::unavailable());

    let response = post_json(
        test.app(),
        "/api/v1/signup",
        json!({ "email": "not-an-email", "password": "hunter22", "name": "Ada" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn signup_creates_confirmed_account() {
    let test = build_test_app(ScriptedLlm::unavailable());

    let response = post_json(
        test.app(),
        "/api/v1/signup",
        json!({ "email": "ada@example.com", "password": "hunter22", "name": "Ada" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "ada@example.com");
    assert_eq!(json["data"]["name"], "Ada");

    let stored = test.identity.user_by_email("ada@example.com").unwrap();
    assert!(stored.email_confirmed);
    assert_eq!(json["data"]["id"], stored.id.to_string());
}

#[tokio::test]
async fn signup_with_confirmed_email_conflicts() {
    let test = build_test_app(ScriptedLlm::unavailable());
    test.identity.add_user("ada@example.com", "Ada", true);

    let response = post_json(
        test.app(),
        "/api/v1/signup",
        json!({ "email": "ada@example.com", "password": "hunter22", "name": "Ada" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_replaces_unconfirmed_account() {
    let test = build_test_app(ScriptedLlm::unavailable());
    let stale = test.identity.add_user("ada@example.com", "Old Ada", false);

    let response = post_json(
        test.app(),
        "/api/v1/signup",
        json!({ "email": "ada@example.com", "password": "hunter22", "name": "Ada" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let fresh = test.identity.user_by_email("ada@example.com").unwrap();
    assert_ne!(fresh.id, stale.id);
    assert!(fresh.email_confirmed);
    assert_eq!(fresh.name.as_deref(), Some("Ada"));
}

// ---------------------------------------------------------------------------
// Password reset / deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reset_password_updates_the_account() {
    let test = build_test_app(ScriptedLlm::unavailable());
    test.identity.add_user("ada@example.com", "Ada", true);

    let response = post_json(
        test.app(),
        "/api/v1/reset-password",
        json!({ "email": "ada@example.com", "newPassword": "correct-horse" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        test.identity.password_of("ada@example.com").as_deref(),
        Some("correct-horse")
    );
}

#[tokio::test]
async fn reset_password_for_unknown_email_returns_404() {
    let test = build_test_app(ScriptedLlm::unavailable());

    let response = post_json(
        test.app(),
        "/api/v1/reset-password",
        json!({ "email": "nobody@example.com", "newPassword": "correct-horse" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reset_password_requires_fields() {
    let test = build_test_app(ScriptedLlm::unavailable());

    let response = post_json(
        test.app(),
        "/api/v1/reset-password",
        json!({ "email": "ada@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_user_for_unknown_email_returns_404() {
    let test = build_test_app(ScriptedLlm::unavailable());

    let response = post_json(
        test.app(),
        "/api/v1/delete-user",
        json!({ "email": "nobody@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_user_removes_the_account() {
    let test = build_test_app(ScriptedLlm::unavailable());
    test.identity.add_user("ada@example.com", "Ada", true);

    let response = post_json(
        test.app(),
        "/api/v1/delete-user",
        json!({ "email": "ada@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(test.identity.user_by_email("ada@example.com").is_none());
}

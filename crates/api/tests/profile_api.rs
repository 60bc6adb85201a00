//! HTTP-level tests for the learner profile.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_auth, post_json_auth, profile_body, ScriptedLlm};
use serde_json::json;

#[tokio::test]
async fn profile_before_onboarding_is_a_stub() {
    let test = build_test_app(ScriptedLlm::unavailable());
    let (user, token) = test.sign_in("ada@example.com", "Ada");

    let response = get_auth(test.app(), "/api/v1/profile", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["userId"], user.id.to_string());
    assert_eq!(json["data"]["email"], "ada@example.com");
    assert_eq!(json["data"]["name"], "Ada");
    assert_eq!(json["data"]["onboardingComplete"], false);
    assert_eq!(json["data"]["knownSkills"], json!([]));
}

#[tokio::test]
async fn saved_profile_is_returned_with_session_identity() {
    let test = build_test_app(ScriptedLlm::unavailable());
    let (_user, token) = test.sign_in("ada@example.com", "Ada");

    let mut body = profile_body("Data Scientist");
    // Identity comes from the session, never from the body.
    body["email"] = json!("spoofed@example.com");

    let response = post_json_auth(test.app(), "/api/v1/profile", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(test.app(), "/api/v1/profile", &token).await).await;
    let profile = &json["data"];
    assert_eq!(profile["email"], "ada@example.com");
    assert_eq!(profile["targetGoal"], "Data Scientist");
    assert_eq!(profile["knownSkills"], json!(["Python", "Excel"]));
    assert_eq!(profile["onboardingComplete"], true);
    assert!(profile["createdAt"].is_string());
}

#[tokio::test]
async fn resubmitting_keeps_created_at() {
    let test = build_test_app(ScriptedLlm::unavailable());
    let (_user, token) = test.sign_in("ada@example.com", "Ada");

    let first = body_json(
        post_json_auth(test.app(), "/api/v1/profile", &token, profile_body("Data Scientist")).await,
    )
    .await;
    let second = body_json(
        post_json_auth(
            test.app(),
            "/api/v1/profile",
            &token,
            profile_body("Full-Stack Developer"),
        )
        .await,
    )
    .await;

    assert_eq!(first["data"]["createdAt"], second["data"]["createdAt"]);
    assert_eq!(second["data"]["targetGoal"], "Full-Stack Developer");
}

#[tokio::test]
async fn completing_onboarding_without_goal_is_rejected() {
    let test = build_test_app(ScriptedLlm::unavailable());
    let (_user, token) = test.sign_in("ada@example.com", "Ada");

    let response = post_json_auth(
        test.app(),
        "/api/v1/profile",
        &token,
        json!({ "knownSkills": ["Go"], "onboardingComplete": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn profiles_are_isolated_per_user() {
    let test = build_test_app(ScriptedLlm::unavailable());
    let (_ada, ada_token) = test.sign_in("ada@example.com", "Ada");
    let (_bob, bob_token) = test.sign_in("bob@example.com", "Bob");

    post_json_auth(test.app(), "/api/v1/profile", &ada_token, profile_body("Data Scientist")).await;

    let json = body_json(get_auth(test.app(), "/api/v1/profile", &bob_token).await).await;
    assert_eq!(json["data"]["email"], "bob@example.com");
    assert_eq!(json["data"]["onboardingComplete"], false);
}

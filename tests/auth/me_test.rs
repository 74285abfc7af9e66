use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{test_email, test_password, TestContext};
use import_export_portal::modules::auth::model::AdminStatus;

#[tokio::test]
async fn me_with_bearer_token_returns_identity() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let token = ctx.approved_admin_token(&email).await;

    let response = ctx.server.get("/auth/me").authorization_bearer(&token).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn me_with_session_cookie_returns_identity() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.seed_admin(&email, AdminStatus::Approved).await;
    let login = ctx.login(&email, test_password()).await;
    let cookie = login.cookie("auth-token");

    let response = ctx.server.get("/auth/me").add_cookie(cookie).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["user"]["email"], email.as_str());
}

#[tokio::test]
async fn me_without_token_returns_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/auth/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn me_with_invalid_token_returns_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .get("/auth/me")
        .authorization_bearer("invalid-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_with_expired_token_returns_unauthorized() {
    use chrono::Duration;
    use import_export_portal::modules::auth::model::Role;
    use import_export_portal::services::jwt::{JwtService, SessionSubject};

    let ctx = TestContext::new().await;
    let email = test_email();
    let id = ctx.seed_admin(&email, AdminStatus::Approved).await;

    let expired = JwtService::new(crate::common::JWT_SECRET, Duration::seconds(-60))
        .unwrap()
        .issue(&SessionSubject {
            user_id: id,
            email,
            name: "Test Admin".into(),
            role: Role::Admin,
            status: AdminStatus::Approved,
        })
        .unwrap();

    let response = ctx
        .server
        .get("/auth/me")
        .authorization_bearer(expired)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleted_admin_token_stops_working() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let token = ctx.approved_admin_token(&email).await;
    let admin = ctx
        .repos
        .accounts
        .find_admin_by_email(&email)
        .await
        .unwrap()
        .unwrap();
    ctx.repos.accounts.delete_admin(&admin.id).await.unwrap();

    let response = ctx.server.get("/auth/me").authorization_bearer(&token).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

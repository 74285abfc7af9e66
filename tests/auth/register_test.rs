use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, test_password, TestContext, SUPER_ADMIN_EMAIL};
use import_export_portal::modules::auth::model::AdminStatus;

#[tokio::test]
async fn register_creates_pending_admin_and_sends_otp() {
    let ctx = TestContext::new().await;
    let email = test_email();

    let response = ctx.register(&email).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["email_sent"], true);
    assert_eq!(body["otp_expires_in"], 60);
    assert!(body.get("debug_otp").is_none());

    let code = ctx.mailer.last_otp_for(&email).expect("OTP email sent");
    assert_eq!(code.len(), 6);

    let admin = ctx
        .repos
        .accounts
        .find_admin_by_email(&email)
        .await
        .unwrap()
        .expect("admin stored");
    assert_eq!(admin.status, AdminStatus::Pending);
    assert_ne!(admin.password_hash, test_password());
}

#[tokio::test]
async fn register_in_development_echoes_otp() {
    let ctx = TestContext::development().await;
    let email = test_email();

    let response = ctx.register(&email).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let sent = ctx.mailer.last_otp_for(&email).unwrap();
    assert_eq!(body["debug_otp"], sent.as_str());
}

#[tokio::test]
async fn register_normalizes_email() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({
            "name": "Amal",
            "email": "  Amal.Trader@Example.COM ",
            "password": test_password(),
            "password_confirm": test_password()
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["email"], "amal.trader@example.com");
}

#[tokio::test]
async fn register_with_existing_email_returns_conflict() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.register(&email).await.assert_status(StatusCode::CREATED);

    let response = ctx.register(&email).await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "conflict");
}

#[tokio::test]
async fn register_with_super_admin_email_returns_conflict() {
    let ctx = TestContext::new().await;
    ctx.seed_super_admin().await;

    let response = ctx.register(SUPER_ADMIN_EMAIL).await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_with_mismatched_passwords_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({
            "name": "Amal",
            "email": test_email(),
            "password": test_password(),
            "password_confirm": "DifferentPassword123!"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn register_with_short_password_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({
            "name": "Amal",
            "email": test_email(),
            "password": "short",
            "password_confirm": "short"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_with_invalid_email_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({
            "name": "Amal",
            "email": "not-an-email",
            "password": test_password(),
            "password_confirm": test_password()
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_with_missing_fields_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/auth/register")
        .json(&json!({ "email": test_email() }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_succeeds_when_email_delivery_fails() {
    let ctx = TestContext::new().await;
    ctx.mailer.set_failing(true);
    let email = test_email();

    let response = ctx.register(&email).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["email_sent"], false);
    assert!(ctx.repos.otps.find(&email).await.unwrap().is_some());
}

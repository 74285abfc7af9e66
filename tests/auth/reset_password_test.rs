use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{
    test_email, test_password, TestContext, SUPER_ADMIN_EMAIL, SUPER_ADMIN_PASSWORD,
};
use import_export_portal::modules::auth::model::AdminStatus;

const NEW_PASSWORD: &str = "NewPassword123!";

async fn request_reset(ctx: &TestContext, email: &str) -> String {
    ctx.server
        .post("/auth/admin/forgot-password")
        .json(&json!({ "email": email }))
        .await
        .assert_status_ok();

    ctx.mailer.last_reset_token_for(email).expect("reset token")
}

async fn reset(ctx: &TestContext, token: &str, password: &str) -> axum_test::TestResponse {
    ctx.server
        .post("/auth/admin/reset-password")
        .json(&json!({
            "token": token,
            "password": password,
            "password_confirm": password
        }))
        .await
}

#[tokio::test]
async fn reset_password_with_valid_token_changes_password() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.seed_admin(&email, AdminStatus::Approved).await;
    let token = request_reset(&ctx, &email).await;

    reset(&ctx, &token, NEW_PASSWORD).await.assert_status_ok();

    ctx.login(&email, NEW_PASSWORD).await.assert_status_ok();
    ctx.login(&email, test_password())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reset_token_cannot_be_replayed() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.seed_admin(&email, AdminStatus::Approved).await;
    let token = request_reset(&ctx, &email).await;
    reset(&ctx, &token, NEW_PASSWORD).await.assert_status_ok();

    let response = reset(&ctx, &token, "AnotherPassword123!").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_or_expired");
    ctx.login(&email, NEW_PASSWORD).await.assert_status_ok();
}

#[tokio::test]
async fn reset_with_unknown_token_returns_invalid_or_expired() {
    let ctx = TestContext::new().await;

    let response = reset(&ctx, "deadbeef", NEW_PASSWORD).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "invalid_or_expired");
}

#[tokio::test]
async fn reset_with_mismatched_confirmation_returns_bad_request() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.seed_admin(&email, AdminStatus::Approved).await;
    let token = request_reset(&ctx, &email).await;

    let response = ctx
        .server
        .post("/auth/admin/reset-password")
        .json(&json!({
            "token": token,
            "password": NEW_PASSWORD,
            "password_confirm": "SomethingElse123!"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");

    // Validation failures leave the token usable.
    reset(&ctx, &token, NEW_PASSWORD).await.assert_status_ok();
}

#[tokio::test]
async fn reset_updates_super_admin_password() {
    let ctx = TestContext::new().await;
    ctx.seed_super_admin().await;
    let token = request_reset(&ctx, SUPER_ADMIN_EMAIL).await;

    reset(&ctx, &token, NEW_PASSWORD).await.assert_status_ok();

    ctx.login(SUPER_ADMIN_EMAIL, NEW_PASSWORD).await.assert_status_ok();
    ctx.login(SUPER_ADMIN_EMAIL, SUPER_ADMIN_PASSWORD)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn newer_reset_request_invalidates_older_token() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.seed_admin(&email, AdminStatus::Approved).await;
    let first = request_reset(&ctx, &email).await;
    let second = request_reset(&ctx, &email).await;

    reset(&ctx, &first, NEW_PASSWORD)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    reset(&ctx, &second, NEW_PASSWORD).await.assert_status_ok();
}

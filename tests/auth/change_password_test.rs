use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, test_password, TestContext};

const NEW_PASSWORD: &str = "ChangedPassword123!";

async fn change(
    ctx: &TestContext,
    token: &str,
    current: &str,
    new: &str,
) -> axum_test::TestResponse {
    ctx.server
        .put("/auth/admin/change-password")
        .authorization_bearer(token)
        .json(&json!({
            "current_password": current,
            "new_password": new,
            "new_password_confirm": new
        }))
        .await
}

#[tokio::test]
async fn change_password_with_correct_current_password() {
    let ctx = TestContext::new().await;
    let email = test_email();
    let token = ctx.approved_admin_token(&email).await;

    change(&ctx, &token, test_password(), NEW_PASSWORD)
        .await
        .assert_status_ok();

    ctx.login(&email, NEW_PASSWORD).await.assert_status_ok();
    ctx.login(&email, test_password())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn change_password_with_wrong_current_password_returns_bad_request() {
    let ctx = TestContext::new().await;
    let token = ctx.approved_admin_token(&test_email()).await;

    let response = change(&ctx, &token, "NotMyPassword123!", NEW_PASSWORD).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");
}

#[tokio::test]
async fn change_password_to_same_password_returns_bad_request() {
    let ctx = TestContext::new().await;
    let token = ctx.approved_admin_token(&test_email()).await;

    let response = change(&ctx, &token, test_password(), test_password()).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn change_password_works_for_super_admin() {
    let ctx = TestContext::new().await;
    let token = ctx.super_admin_token().await;

    change(
        &ctx,
        &token,
        crate::common::SUPER_ADMIN_PASSWORD,
        NEW_PASSWORD,
    )
    .await
    .assert_status_ok();

    ctx.login(crate::common::SUPER_ADMIN_EMAIL, NEW_PASSWORD)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn change_password_without_session_returns_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .put("/auth/admin/change-password")
        .json(&json!({
            "current_password": test_password(),
            "new_password": NEW_PASSWORD,
            "new_password_confirm": NEW_PASSWORD
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, TestContext};
use import_export_portal::modules::auth::model::AdminStatus;

async fn forgot(ctx: &TestContext, email: &str) -> String {
    ctx.server
        .post("/auth/admin/forgot-password")
        .json(&json!({ "email": email }))
        .await
        .assert_status_ok();
    ctx.mailer.last_reset_token_for(email).unwrap()
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
async fn reset_token_is_single_use_over_mysql() {
    let Some(ctx) = TestContext::mysql().await else {
        return;
    };
    let email = test_email();
    ctx.seed_admin(&email, AdminStatus::Approved).await;

    let first = forgot(&ctx, &email).await;
    let second = forgot(&ctx, &email).await;
    assert_ne!(first, second);

    // The second request replaced the first row.
    reset(&ctx, &first, "FirstNewPassword1!")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    reset(&ctx, &second, "SecondNewPassword1!")
        .await
        .assert_status_ok();
    ctx.login(&email, "SecondNewPassword1!").await.assert_status_ok();

    let replay = reset(&ctx, &second, "ThirdNewPassword1!").await;
    replay.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = replay.json();
    assert_eq!(body["code"], "invalid_or_expired");
    ctx.login(&email, "SecondNewPassword1!").await.assert_status_ok();
}

#[tokio::test]
async fn deleted_admin_reset_token_is_void_over_mysql() {
    let Some(ctx) = TestContext::mysql().await else {
        return;
    };
    let root = ctx.super_admin_token().await;
    let email = test_email();
    let id = ctx.seed_admin(&email, AdminStatus::Approved).await;
    let token = forgot(&ctx, &email).await;

    ctx.server
        .delete(&format!("/auth/super-admin/delete-admin/{id}"))
        .authorization_bearer(&root)
        .await
        .assert_status_ok();

    reset(&ctx, &token, "NewPassword123!")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

use serde_json::{json, Value};

use crate::common::{test_email, TestContext, SUPER_ADMIN_EMAIL};
use import_export_portal::modules::auth::model::AdminStatus;

async fn forgot(ctx: &TestContext, email: &str) -> axum_test::TestResponse {
    ctx.server
        .post("/auth/admin/forgot-password")
        .json(&json!({ "email": email }))
        .await
}

#[tokio::test]
async fn forgot_password_response_does_not_reveal_account_existence() {
    let ctx = TestContext::new().await;
    let known = test_email();
    ctx.seed_admin(&known, AdminStatus::Approved).await;

    let known_response = forgot(&ctx, &known).await;
    let unknown_response = forgot(&ctx, &test_email()).await;

    known_response.assert_status_ok();
    unknown_response.assert_status_ok();
    let known_body: Value = known_response.json();
    let unknown_body: Value = unknown_response.json();
    assert_eq!(known_body, unknown_body);
}

#[tokio::test]
async fn forgot_password_emails_reset_link() {
    let ctx = TestContext::new().await;
    let email = test_email();
    ctx.seed_admin(&email, AdminStatus::Approved).await;

    forgot(&ctx, &email).await.assert_status_ok();

    let sent = ctx
        .mailer
        .outbox()
        .into_iter()
        .rev()
        .find(|m| m.to == email)
        .expect("reset email");
    assert!(sent
        .payload
        .starts_with("https://portal.test/admin/reset-password?token="));
    let token = ctx.mailer.last_reset_token_for(&email).unwrap();
    assert_eq!(token.len(), 64);
}

#[tokio::test]
async fn forgot_password_works_for_super_admin() {
    let ctx = TestContext::new().await;
    ctx.seed_super_admin().await;

    forgot(&ctx, SUPER_ADMIN_EMAIL).await.assert_status_ok();

    assert!(ctx.mailer.last_reset_token_for(SUPER_ADMIN_EMAIL).is_some());
}

#[tokio::test]
async fn forgot_password_for_unknown_email_sends_nothing() {
    let ctx = TestContext::new().await;

    forgot(&ctx, &test_email()).await.assert_status_ok();

    assert!(ctx.mailer.outbox().is_empty());
}

#[tokio::test]
async fn forgot_password_in_development_echoes_token() {
    let ctx = TestContext::development().await;
    let email = test_email();
    ctx.seed_admin(&email, AdminStatus::Approved).await;

    let response = forgot(&ctx, &email).await;

    let body: Value = response.json();
    let sent = ctx.mailer.last_reset_token_for(&email).unwrap();
    assert_eq!(body["debug_token"], sent.as_str());

    let unknown: Value = forgot(&ctx, &test_email()).await.json();
    assert!(unknown.get("debug_token").is_none());
}

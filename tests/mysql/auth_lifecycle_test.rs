use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn registration_to_rejection_over_mysql() {
    let Some(ctx) = TestContext::mysql().await else {
        return;
    };
    let root = ctx.super_admin_token().await;
    let email = test_email();

    ctx.register(&email).await.assert_status(StatusCode::CREATED);
    ctx.register(&email).await.assert_status(StatusCode::CONFLICT);
    let code = ctx.mailer.last_otp_for(&email).unwrap();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let mismatch = ctx
        .server
        .post("/auth/admin/verify-otp")
        .json(&json!({ "email": email, "otp": wrong }))
        .await;
    mismatch.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = mismatch.json();
    assert_eq!(body["code"], "mismatch");
    let challenge = ctx.repos.otps.find(&email).await.unwrap().unwrap();
    assert_eq!(challenge.attempts, 1);

    ctx.server
        .post("/auth/admin/verify-otp")
        .json(&json!({ "email": email, "otp": code }))
        .await
        .assert_status_ok();

    // Status columns map back through the enum on the way out.
    let verified: Value = ctx
        .server
        .get("/auth/super-admin/admins?status=verified")
        .authorization_bearer(&root)
        .await
        .json();
    let entry = verified["admins"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["email"] == email.as_str())
        .cloned()
        .expect("registered admin listed as verified");
    let id = entry["id"].as_str().unwrap().to_string();

    ctx.server
        .put(&format!("/auth/super-admin/update-admin/{id}"))
        .authorization_bearer(&root)
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status_ok();
    let token = ctx.token_for(&email, test_password()).await;
    ctx.server
        .get("/auth/me")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let rejected = ctx
        .server
        .put(&format!("/auth/super-admin/reject-admin/{id}"))
        .authorization_bearer(&root)
        .json(&json!({ "reason": "Documents missing" }))
        .await;
    rejected.assert_status_ok();
    let body: Value = rejected.json();
    assert_eq!(body["admin"]["status"], "rejected");
    assert_eq!(body["admin"]["rejection_reason"], "Documents missing");

    ctx.server
        .get("/auth/me")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    ctx.login(&email, test_password())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    ctx.server
        .delete(&format!("/auth/super-admin/delete-admin/{id}"))
        .authorization_bearer(&root)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn resend_refuses_live_code_over_mysql() {
    let Some(ctx) = TestContext::mysql().await else {
        return;
    };
    let email = test_email();
    ctx.register(&email).await.assert_status(StatusCode::CREATED);

    let response = ctx
        .server
        .post("/auth/admin/resend-otp")
        .json(&json!({ "email": email }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "already_valid");
}

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, TestContext};

async fn submit(ctx: &TestContext, subject: &str) -> String {
    let response = ctx
        .server
        .post("/contact")
        .json(&json!({
            "name": "Sara Khalil",
            "email": "sara@example.com",
            "subject": subject,
            "message": "Do you handle customs paperwork for Egypt?"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn contact_inbox_flow() {
    let ctx = TestContext::new().await;
    let token = ctx.approved_admin_token(&test_email()).await;
    let first = submit(&ctx, "Customs").await;
    submit(&ctx, "Pricing").await;

    let inbox: Value = ctx
        .server
        .get("/admin/contacts")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(inbox["total"], 2);
    assert_eq!(inbox["unread"], 2);

    ctx.server
        .put(&format!("/admin/contacts/{first}/read"))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let unread: Value = ctx
        .server
        .get("/admin/contacts?unread=true")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(unread["total"], 1);
    assert_eq!(unread["contacts"][0]["subject"], "Pricing");
}

#[tokio::test]
async fn contact_form_is_validated() {
    let ctx = TestContext::new().await;

    ctx.server
        .post("/contact")
        .json(&json!({
            "name": "S",
            "email": "sara@example.com",
            "subject": "Hi",
            "message": "short"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inbox_requires_session() {
    let ctx = TestContext::new().await;

    ctx.server
        .get("/admin/contacts")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_contact_then_not_found() {
    let ctx = TestContext::new().await;
    let token = ctx.approved_admin_token(&test_email()).await;
    let id = submit(&ctx, "Customs").await;
    let path = format!("/admin/contacts/{id}");

    ctx.server
        .delete(&path)
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
    ctx.server
        .delete(&path)
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .put(&format!("{path}/read"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, TestContext};

async fn submit(ctx: &TestContext, rating: i32) -> String {
    let response = ctx
        .server
        .post("/reviews")
        .json(&json!({
            "name": "Youssef",
            "email": "youssef@example.com",
            "company": "Atlas Imports",
            "rating": rating,
            "comment": "Shipment arrived on time and fully documented."
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

async fn moderate(ctx: &TestContext, token: &str, id: &str, status: &str) {
    ctx.server
        .put(&format!("/admin/reviews/{id}"))
        .authorization_bearer(token)
        .json(&json!({ "status": status }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn pending_reviews_are_not_public() {
    let ctx = TestContext::new().await;
    submit(&ctx, 5).await;

    let public: Value = ctx.server.get("/reviews").await.json();

    assert_eq!(public["total"], 0);
    assert!(public["average_rating"].is_null());
}

#[tokio::test]
async fn approved_reviews_are_public_without_email() {
    let ctx = TestContext::new().await;
    let token = ctx.approved_admin_token(&test_email()).await;
    let first = submit(&ctx, 5).await;
    let second = submit(&ctx, 4).await;
    let third = submit(&ctx, 1).await;
    moderate(&ctx, &token, &first, "approved").await;
    moderate(&ctx, &token, &second, "approved").await;
    moderate(&ctx, &token, &third, "rejected").await;

    let public: Value = ctx.server.get("/reviews").await.json();

    assert_eq!(public["total"], 2);
    assert_eq!(public["average_rating"], 4.5);
    assert!(public["reviews"][0].get("email").is_none());
    assert!(public["reviews"][0].get("status").is_none());
}

#[tokio::test]
async fn moderation_queue_filters_by_status() {
    let ctx = TestContext::new().await;
    let token = ctx.approved_admin_token(&test_email()).await;
    let approved = submit(&ctx, 5).await;
    submit(&ctx, 3).await;
    moderate(&ctx, &token, &approved, "approved").await;

    let pending: Value = ctx
        .server
        .get("/admin/reviews?status=pending")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(pending["total"], 1);
    assert_eq!(pending["reviews"][0]["email"], "youssef@example.com");
}

#[tokio::test]
async fn rating_out_of_range_returns_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .post("/reviews")
        .json(&json!({
            "name": "Youssef",
            "rating": 6,
            "comment": "Shipment arrived on time and fully documented."
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn moderation_requires_session() {
    let ctx = TestContext::new().await;
    let id = submit(&ctx, 4).await;

    ctx.server
        .put(&format!("/admin/reviews/{id}"))
        .json(&json!({ "status": "approved" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_review_then_not_found() {
    let ctx = TestContext::new().await;
    let token = ctx.approved_admin_token(&test_email()).await;
    let id = submit(&ctx, 4).await;
    let path = format!("/admin/reviews/{id}");

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
}

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{create_service, service_body, test_email, test_slug, TestContext};

fn request_body(service_id: &str) -> Value {
    json!({
        "service_id": service_id,
        "full_name": "Karim Nasser",
        "email": "karim@example.com",
        "phone": "+966500000000",
        "message": "Please quote 2x40ft from Jeddah to Rotterdam."
    })
}

#[tokio::test]
async fn owner_scoped_request_listing_over_mysql() {
    let Some(ctx) = TestContext::mysql().await else {
        return;
    };
    let owner = ctx.approved_admin_token(&test_email()).await;
    let other = ctx.approved_admin_token(&test_email()).await;
    let first = create_service(&ctx, &owner, &test_slug("sea")).await;
    let second = create_service(&ctx, &owner, &test_slug("air")).await;
    let foreign = create_service(&ctx, &other, &test_slug("rail")).await;

    for id in [&first, &second, &foreign] {
        ctx.server
            .post("/requests")
            .json(&request_body(id))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let mine: Value = ctx
        .server
        .get("/admin/requests")
        .authorization_bearer(&owner)
        .await
        .json();
    assert_eq!(mine["total"], 2);
    assert!(mine["requests"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["service_id"] != foreign.as_str()));

    let request_id = mine["requests"][0]["id"].as_str().unwrap().to_string();
    ctx.server
        .put(&format!("/admin/requests/{request_id}"))
        .authorization_bearer(&owner)
        .json(&json!({ "status": "in_progress" }))
        .await
        .assert_status_ok();
    ctx.server
        .put(&format!("/admin/requests/{request_id}"))
        .authorization_bearer(&other)
        .json(&json!({ "status": "cancelled" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let in_progress: Value = ctx
        .server
        .get("/admin/requests?status=in_progress")
        .authorization_bearer(&owner)
        .await
        .json();
    assert_eq!(in_progress["total"], 1);

    // An admin without services sees nothing.
    let empty = ctx.approved_admin_token(&test_email()).await;
    let none: Value = ctx
        .server
        .get("/admin/requests")
        .authorization_bearer(&empty)
        .await
        .json();
    assert_eq!(none["total"], 0);
}

#[tokio::test]
async fn duplicate_slug_maps_to_conflict_over_mysql() {
    let Some(ctx) = TestContext::mysql().await else {
        return;
    };
    let token = ctx.approved_admin_token(&test_email()).await;
    let slug = test_slug("customs");
    create_service(&ctx, &token, &slug).await;

    let response = ctx
        .server
        .post("/admin/services")
        .authorization_bearer(&token)
        .json(&service_body(&slug))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "conflict");
}

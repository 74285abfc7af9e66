use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};

use crate::common::{test_email, test_password, TestContext, TestOptions};

const FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

async fn limited_context(trust_forwarded_for: bool) -> TestContext {
    TestContext::with_options(TestOptions {
        rate_limit_burst: 3,
        trust_forwarded_for,
        ..TestOptions::default()
    })
    .await
}

async fn login_from(ctx: &TestContext, client: &'static str, email: &str) -> axum_test::TestResponse {
    ctx.server
        .post("/auth/login")
        .add_header(FORWARDED_FOR, HeaderValue::from_static(client))
        .json(&json!({ "email": email, "password": test_password() }))
        .await
}

#[tokio::test]
async fn auth_posts_are_limited_per_client() {
    let ctx = limited_context(false).await;
    let email = test_email();

    for _ in 0..3 {
        ctx.login(&email, test_password())
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    let response = ctx.login(&email, test_password()).await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["code"], "rate_limited");
}

#[tokio::test]
async fn rotating_forwarded_for_does_not_reset_the_limit() {
    let ctx = limited_context(false).await;
    let email = test_email();
    let clients = [
        "10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4", "10.0.0.5", "10.0.0.6",
    ];

    let mut allowed = 0;
    for client in clients {
        if login_from(&ctx, client, &email).await.status_code() != StatusCode::TOO_MANY_REQUESTS {
            allowed += 1;
        }
    }

    assert_eq!(allowed, 3);
}

#[tokio::test]
async fn verify_otp_guesses_are_limited() {
    let ctx = limited_context(false).await;
    let email = test_email();

    for code in ["111111", "222222", "333333"] {
        ctx.server
            .post("/auth/admin/verify-otp")
            .add_header(FORWARDED_FOR, HeaderValue::from_static("10.0.0.9"))
            .json(&json!({ "email": email, "otp": code }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    ctx.server
        .post("/auth/admin/verify-otp")
        .add_header(FORWARDED_FOR, HeaderValue::from_static("10.0.0.10"))
        .json(&json!({ "email": email, "otp": "444444" }))
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn trusted_proxy_limits_each_forwarded_client() {
    let ctx = limited_context(true).await;
    let email = test_email();

    for _ in 0..3 {
        login_from(&ctx, "203.0.113.7", &email)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
    login_from(&ctx, "203.0.113.7", &email)
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    // Another client behind the same proxy still gets through.
    login_from(&ctx, "198.51.100.2", &email)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_routes_are_not_limited() {
    let ctx = limited_context(false).await;

    for _ in 0..5 {
        ctx.server
            .get("/auth/me")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

use serde_json::Value;

use crate::common::TestContext;

#[tokio::test]
async fn logout_clears_session_cookie() {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/auth/logout").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Logged out");

    let cookie = response.cookie("auth-token");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
}

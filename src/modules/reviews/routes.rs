use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn review_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/reviews",
            get(controller::list_public_reviews).post(controller::submit_review),
        )
        .route("/admin/reviews", get(controller::list_reviews))
        .route(
            "/admin/reviews/{id}",
            put(controller::moderate_review).delete(controller::delete_review),
        )
}

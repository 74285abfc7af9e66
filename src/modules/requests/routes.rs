use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn request_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/requests", post(controller::submit_request))
        .route("/admin/requests", get(controller::list_requests))
        .route("/admin/requests/{id}", put(controller::update_request))
}

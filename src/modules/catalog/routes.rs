use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/services", get(controller::list_services))
        .route("/services/{slug}", get(controller::get_service))
        .route(
            "/admin/services",
            get(controller::admin_list_services).post(controller::create_service),
        )
        .route(
            "/admin/services/{id}",
            put(controller::update_service).delete(controller::delete_service),
        )
}

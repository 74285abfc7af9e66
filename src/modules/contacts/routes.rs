use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn contact_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contact", post(controller::submit_contact))
        .route("/admin/contacts", get(controller::list_contacts))
        .route("/admin/contacts/{id}/read", put(controller::mark_contact_read))
        .route("/admin/contacts/{id}", delete(controller::delete_contact))
}

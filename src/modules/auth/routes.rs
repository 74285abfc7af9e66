use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use super::{controller, super_admin};
use crate::services::rate_limit::{IpRateLimiter, RateLimitLayer};
use crate::AppState;

/// Unauthenticated POSTs share one per-IP limiter; session routes don't.
pub fn auth_routes(limiter: IpRateLimiter) -> Router<Arc<AppState>> {
    let public = Router::new()
        .route("/register", post(controller::register))
        .route("/login", post(controller::login))
        .route("/admin/verify-otp", post(controller::verify_otp))
        .route("/admin/resend-otp", post(controller::resend_otp))
        .route("/admin/forgot-password", post(controller::forgot_password))
        .route("/admin/reset-password", post(controller::reset_password))
        .route_layer(RateLimitLayer::new(limiter));

    let session = Router::new()
        .route("/logout", post(controller::logout))
        .route("/me", get(controller::me))
        .route("/admin/change-password", put(controller::change_password));

    let super_admin = Router::new()
        .route("/admins", get(super_admin::list_admins))
        .route("/create-admin", post(super_admin::create_admin))
        .route("/update-admin/{id}", put(super_admin::update_admin))
        .route("/reject-admin/{id}", put(super_admin::reject_admin))
        .route("/delete-admin/{id}", delete(super_admin::delete_admin));

    public.merge(session).nest("/super-admin", super_admin)
}

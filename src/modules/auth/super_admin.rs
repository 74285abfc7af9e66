use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::modules::auth::{
    credentials::{check_decision, normalize_email, CredentialStore},
    gate::SuperAdminSession,
    model::AdminStatus,
    schema::{
        AdminEnvelope, AdminListQuery, AdminListResponse, AdminResponse, CreateAdminRequest,
        MessageResponse, RejectAdminRequest, UpdateAdminRequest,
    },
};
use crate::AppState;

pub async fn list_admins(
    State(state): State<Arc<AppState>>,
    SuperAdminSession(_): SuperAdminSession,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<AdminListResponse>> {
    let admins: Vec<AdminResponse> = CredentialStore::new(state.repos.accounts.as_ref())
        .list_admins(query.status)
        .await?
        .into_iter()
        .map(AdminResponse::from)
        .collect();

    Ok(Json(AdminListResponse {
        total: admins.len(),
        admins,
    }))
}

/// Direct creation is itself the approval decision.
pub async fn create_admin(
    State(state): State<Arc<AppState>>,
    SuperAdminSession(actor): SuperAdminSession,
    ValidatedJson(req): ValidatedJson<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AdminEnvelope>)> {
    let email = normalize_email(&req.email);
    let admin = CredentialStore::new(state.repos.accounts.as_ref())
        .create_admin(&req.name, &email, &req.password, AdminStatus::Approved)
        .await?;

    info!(actor = %actor.id, admin_id = %admin.id, "admin created by super-admin");

    Ok((
        StatusCode::CREATED,
        Json(AdminEnvelope {
            message: "Admin created",
            admin: admin.into(),
        }),
    ))
}

/// Drops outstanding OTP and reset challenges for an email no admin owns
/// any more.
async fn retire_email(state: &AppState, email: &str) -> Result<()> {
    state.repos.otps.delete(email).await?;
    state.repos.resets.delete(email).await
}

/// The requested decision is checked before the profile is written, so a
/// refused transition leaves the record untouched.
pub async fn update_admin(
    State(state): State<Arc<AppState>>,
    SuperAdminSession(actor): SuperAdminSession,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateAdminRequest>,
) -> Result<Json<AdminEnvelope>> {
    let store = CredentialStore::new(state.repos.accounts.as_ref());
    let current = store.find_admin(&id).await?;
    if let Some(status) = req.status {
        check_decision(&current, status)?;
    }

    let email = req.email.as_deref().map(normalize_email);
    let mut admin = if req.name.is_some() || email.is_some() {
        store
            .update_profile(&id, req.name.as_deref(), email.as_deref())
            .await?
    } else {
        current.clone()
    };

    if admin.email != current.email {
        retire_email(&state, &current.email).await?;
        info!(actor = %actor.id, admin_id = %id, "admin email changed");
    }

    if let Some(status) = req.status {
        admin = match status {
            AdminStatus::Rejected => store.reject(&id, req.reason.as_deref()).await?,
            _ => store.approve(&id).await?,
        };
        info!(actor = %actor.id, admin_id = %id, status = status.as_str(), "admin status changed");
    }

    Ok(Json(AdminEnvelope {
        message: "Admin updated",
        admin: admin.into(),
    }))
}

/// The body is optional; an empty one rejects without a reason.
pub async fn reject_admin(
    State(state): State<Arc<AppState>>,
    SuperAdminSession(actor): SuperAdminSession,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<AdminEnvelope>> {
    let req: RejectAdminRequest = if body.iter().all(u8::is_ascii_whitespace) {
        RejectAdminRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::validation(e.to_string()))?
    };
    req.validate()?;

    let admin = CredentialStore::new(state.repos.accounts.as_ref())
        .reject(&id, req.reason.as_deref())
        .await?;

    info!(actor = %actor.id, admin_id = %id, "admin rejected");

    Ok(Json(AdminEnvelope {
        message: "Admin rejected",
        admin: admin.into(),
    }))
}

pub async fn delete_admin(
    State(state): State<Arc<AppState>>,
    SuperAdminSession(actor): SuperAdminSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let admin = CredentialStore::new(state.repos.accounts.as_ref())
        .delete_admin(&id)
        .await?;
    retire_email(&state, &admin.email).await?;

    info!(actor = %actor.id, admin_id = %admin.id, "admin deleted");

    Ok(Json(MessageResponse {
        message: "Admin deleted",
    }))
}

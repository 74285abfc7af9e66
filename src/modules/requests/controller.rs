use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::model::{RequestStatus, ServiceRequest};
use super::schema::{
    RequestEnvelope, RequestListQuery, RequestListResponse, SubmitRequestForm,
    SubmitRequestResponse, UpdateRequestBody,
};
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::modules::auth::{credentials::normalize_email, AdminSession};
use crate::AppState;

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn submit_request(
    State(state): State<Arc<AppState>>,
    ValidatedJson(form): ValidatedJson<SubmitRequestForm>,
) -> Result<(StatusCode, Json<SubmitRequestResponse>)> {
    let service = state
        .repos
        .catalog
        .find_by_id(form.service_id.trim())
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::NotFound("Service"))?;

    let now = Utc::now();
    let request = ServiceRequest {
        id: Uuid::new_v4().to_string(),
        service_id: service.id,
        full_name: form.full_name.trim().to_string(),
        email: normalize_email(&form.email),
        phone: form.phone.trim().to_string(),
        company: optional_text(form.company),
        country: optional_text(form.country),
        message: form.message.trim().to_string(),
        status: RequestStatus::New,
        admin_notes: None,
        created_at: now,
        updated_at: now,
    };

    state.repos.requests.insert(&request).await?;
    info!(request_id = %request.id, service_id = %request.service_id, "service request submitted");

    Ok((
        StatusCode::CREATED,
        Json(SubmitRequestResponse {
            message: "Your request has been received",
            request_id: request.id,
        }),
    ))
}

/// Admins see requests on their own services; super-admins see all.
pub async fn list_requests(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
    Query(query): Query<RequestListQuery>,
) -> Result<Json<RequestListResponse>> {
    let requests = if identity.is_super_admin() {
        state.repos.requests.list(None, query.status).await?
    } else {
        let owned: Vec<String> = state
            .repos
            .catalog
            .list_by_owner(&identity.id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        state.repos.requests.list(Some(&owned), query.status).await?
    };

    Ok(Json(RequestListResponse {
        total: requests.len(),
        requests,
    }))
}

pub async fn update_request(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateRequestBody>,
) -> Result<Json<RequestEnvelope>> {
    let mut request = state
        .repos
        .requests
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound("Request"))?;

    let service = state
        .repos
        .catalog
        .find_by_id(&request.service_id)
        .await?
        .ok_or(AppError::NotFound("Service"))?;

    if !service.is_managed_by(&identity) {
        return Err(AppError::forbidden(
            "You can only manage requests for services you created",
        ));
    }

    if let Some(status) = body.status {
        request.status = status;
    }
    if body.admin_notes.is_some() {
        request.admin_notes = optional_text(body.admin_notes);
    }
    request.updated_at = Utc::now();

    if !state.repos.requests.update(&request).await? {
        return Err(AppError::NotFound("Request"));
    }
    info!(request_id = %request.id, status = request.status.as_str(), actor = %identity.id, "service request updated");

    Ok(Json(RequestEnvelope {
        message: "Request updated",
        request,
    }))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::model::Service;
use super::schema::{
    AdminServiceListResponse, CreateServiceRequest, LangQuery, LocalizedService,
    ServiceEnvelope, ServiceListResponse, UpdateServiceRequest,
};
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::modules::auth::{model::Identity, schema::MessageResponse, AdminSession, Viewer};
use crate::AppState;

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unknown ids are 404; services owned by another admin are 403.
async fn managed_service(state: &AppState, identity: &Identity, id: &str) -> Result<Service> {
    let service = state
        .repos
        .catalog
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Service"))?;

    if !service.is_managed_by(identity) {
        return Err(AppError::forbidden("You can only manage services you created"));
    }
    Ok(service)
}

// =============================================================================
// PUBLIC
// =============================================================================

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    viewer: Viewer,
    Query(query): Query<LangQuery>,
) -> Result<Json<ServiceListResponse>> {
    let locale = query.locale();
    let active_only = !(query.include_inactive && viewer.is_staff());

    let services: Vec<LocalizedService> = state
        .repos
        .catalog
        .list(active_only)
        .await?
        .iter()
        .map(|service| LocalizedService::render(service, locale))
        .collect();

    Ok(Json(ServiceListResponse {
        total: services.len(),
        services,
        lang: locale,
        dir: locale.dir(),
    }))
}

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<LocalizedService>> {
    let service = state
        .repos
        .catalog
        .find_by_slug(&slug)
        .await?
        .filter(|s| s.is_active)
        .ok_or(AppError::NotFound("Service"))?;

    Ok(Json(LocalizedService::render(&service, query.locale())))
}

// =============================================================================
// ADMIN
// =============================================================================

pub async fn admin_list_services(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
) -> Result<Json<AdminServiceListResponse>> {
    let services = if identity.is_super_admin() {
        state.repos.catalog.list(false).await?
    } else {
        state.repos.catalog.list_by_owner(&identity.id).await?
    };

    Ok(Json(AdminServiceListResponse {
        total: services.len(),
        services,
    }))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
    ValidatedJson(req): ValidatedJson<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceEnvelope>)> {
    let now = Utc::now();
    let service = Service {
        id: Uuid::new_v4().to_string(),
        slug: req.slug,
        title: req.title.trimmed(),
        summary: req.summary.trimmed(),
        description: req.description.trimmed(),
        icon: blank_to_none(req.icon),
        sort_order: req.sort_order,
        is_active: req.is_active,
        created_by: identity.id.clone(),
        created_at: now,
        updated_at: now,
    };

    state.repos.catalog.insert(&service).await?;
    info!(service_id = %service.id, slug = %service.slug, actor = %identity.id, "service created");

    Ok((
        StatusCode::CREATED,
        Json(ServiceEnvelope {
            message: "Service created",
            service,
        }),
    ))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateServiceRequest>,
) -> Result<Json<ServiceEnvelope>> {
    let mut service = managed_service(&state, &identity, &id).await?;

    if let Some(slug) = req.slug {
        service.slug = slug;
    }
    if let Some(title) = req.title {
        service.title = title.trimmed();
    }
    if let Some(summary) = req.summary {
        service.summary = summary.trimmed();
    }
    if let Some(description) = req.description {
        service.description = description.trimmed();
    }
    if req.icon.is_some() {
        service.icon = blank_to_none(req.icon);
    }
    if let Some(sort_order) = req.sort_order {
        service.sort_order = sort_order;
    }
    if let Some(is_active) = req.is_active {
        service.is_active = is_active;
    }
    service.updated_at = Utc::now();

    if !state.repos.catalog.update(&service).await? {
        return Err(AppError::NotFound("Service"));
    }
    info!(service_id = %service.id, actor = %identity.id, "service updated");

    Ok(Json(ServiceEnvelope {
        message: "Service updated",
        service,
    }))
}

/// Requests on the service are removed with it.
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let service = managed_service(&state, &identity, &id).await?;

    let removed = state.repos.requests.delete_for_service(&service.id).await?;
    if !state.repos.catalog.delete(&service.id).await? {
        return Err(AppError::NotFound("Service"));
    }
    info!(service_id = %service.id, requests_removed = removed, actor = %identity.id, "service deleted");

    Ok(Json(MessageResponse {
        message: "Service deleted",
    }))
}

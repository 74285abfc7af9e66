use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::model::ContactMessage;
use super::schema::{ContactForm, ContactListQuery, ContactListResponse, ContactSubmitted};
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::modules::auth::{credentials::normalize_email, schema::MessageResponse, AdminSession};
use crate::AppState;

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ValidatedJson(form): ValidatedJson<ContactForm>,
) -> Result<(StatusCode, Json<ContactSubmitted>)> {
    let message = ContactMessage {
        id: Uuid::new_v4().to_string(),
        name: form.name.trim().to_string(),
        email: normalize_email(&form.email),
        phone: form
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()),
        subject: form.subject.trim().to_string(),
        message: form.message.trim().to_string(),
        is_read: false,
        created_at: Utc::now(),
    };

    state.repos.contacts.insert(&message).await?;
    info!(contact_id = %message.id, "contact message received");

    Ok((
        StatusCode::CREATED,
        Json(ContactSubmitted {
            message: "Thank you, we will get back to you shortly",
            id: message.id,
        }),
    ))
}

pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    AdminSession(_): AdminSession,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<ContactListResponse>> {
    let contacts = state.repos.contacts.list(query.unread).await?;
    let unread = contacts.iter().filter(|c| !c.is_read).count();

    Ok(Json(ContactListResponse {
        total: contacts.len(),
        unread,
        contacts,
    }))
}

pub async fn mark_contact_read(
    State(state): State<Arc<AppState>>,
    AdminSession(_): AdminSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if !state.repos.contacts.mark_read(&id).await? {
        return Err(AppError::NotFound("Contact message"));
    }

    Ok(Json(MessageResponse {
        message: "Marked as read",
    }))
}

pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if !state.repos.contacts.delete(&id).await? {
        return Err(AppError::NotFound("Contact message"));
    }
    info!(contact_id = %id, actor = %identity.id, "contact message deleted");

    Ok(Json(MessageResponse {
        message: "Contact message deleted",
    }))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::model::{Review, ReviewStatus};
use super::schema::{
    average_rating, ModerateReviewRequest, PublicReview, PublicReviewList, ReviewEnvelope,
    ReviewForm, ReviewListQuery, ReviewListResponse, ReviewSubmitted,
};
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::modules::auth::{credentials::normalize_email, schema::MessageResponse, AdminSession};
use crate::AppState;

/// New reviews wait for moderation.
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    ValidatedJson(form): ValidatedJson<ReviewForm>,
) -> Result<(StatusCode, Json<ReviewSubmitted>)> {
    let now = Utc::now();
    let review = Review {
        id: Uuid::new_v4().to_string(),
        name: form.name.trim().to_string(),
        email: form.email.as_deref().map(normalize_email),
        company: form
            .company
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        rating: form.rating,
        comment: form.comment.trim().to_string(),
        status: ReviewStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    state.repos.reviews.insert(&review).await?;
    info!(review_id = %review.id, rating = review.rating, "review submitted");

    Ok((
        StatusCode::CREATED,
        Json(ReviewSubmitted {
            message: "Thank you, your review will appear once approved",
            id: review.id,
        }),
    ))
}

pub async fn list_public_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PublicReviewList>> {
    let reviews = state.repos.reviews.list(Some(ReviewStatus::Approved)).await?;
    let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();

    Ok(Json(PublicReviewList {
        total: reviews.len(),
        average_rating: average_rating(&ratings),
        reviews: reviews.into_iter().map(PublicReview::from).collect(),
    }))
}

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    AdminSession(_): AdminSession,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<ReviewListResponse>> {
    let reviews = state.repos.reviews.list(query.status).await?;

    Ok(Json(ReviewListResponse {
        total: reviews.len(),
        reviews,
    }))
}

pub async fn moderate_review(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ModerateReviewRequest>,
) -> Result<Json<ReviewEnvelope>> {
    if !state.repos.reviews.update_status(&id, req.status).await? {
        return Err(AppError::NotFound("Review"));
    }
    let review = state
        .repos
        .reviews
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound("Review"))?;

    info!(review_id = %id, status = req.status.as_str(), actor = %identity.id, "review moderated");

    Ok(Json(ReviewEnvelope {
        message: "Review updated",
        review,
    }))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    AdminSession(identity): AdminSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    if !state.repos.reviews.delete(&id).await? {
        return Err(AppError::NotFound("Review"));
    }
    info!(review_id = %id, actor = %identity.id, "review deleted");

    Ok(Json(MessageResponse {
        message: "Review deleted",
    }))
}

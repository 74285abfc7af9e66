use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{Review, ReviewStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(length(min = 2, max = 120))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(max = 200))]
    pub company: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(min = 10, max = 2000))]
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewSubmitted {
    pub message: &'static str,
    pub id: String,
}

/// Public shape: no email, no moderation state.
#[derive(Debug, Serialize)]
pub struct PublicReview {
    pub id: String,
    pub name: String,
    pub company: Option<String>,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for PublicReview {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            name: review.name,
            company: review.company,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicReviewList {
    pub reviews: Vec<PublicReview>,
    pub total: usize,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub status: Option<ReviewStatus>,
}

#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub reviews: Vec<Review>,
    pub total: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ModerateReviewRequest {
    pub status: ReviewStatus,
}

#[derive(Debug, Serialize)]
pub struct ReviewEnvelope {
    pub message: &'static str,
    pub review: Review,
}

/// Mean of `ratings`, rounded to one decimal.
pub fn average_rating(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let mean = sum as f64 / ratings.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

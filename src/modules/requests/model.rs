use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown request status {0:?}")]
pub struct UnknownRequestStatus(pub String);

impl TryFrom<String> for RequestStatus {
    type Error = UnknownRequestStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownRequestStatus(value)),
        }
    }
}

/// A visitor's enquiry about one catalog service.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ServiceRequest {
    pub id: String,
    pub service_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub country: Option<String>,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

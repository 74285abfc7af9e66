use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{RequestStatus, ServiceRequest};

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequestForm {
    #[validate(length(min = 1, message = "Service is required"))]
    pub service_id: String,
    #[validate(length(min = 2, max = 120))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 5, max = 40))]
    pub phone: String,
    #[validate(length(max = 200))]
    pub company: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitRequestResponse {
    pub message: &'static str,
    pub request_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RequestListQuery {
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Serialize)]
pub struct RequestListResponse {
    pub requests: Vec<ServiceRequest>,
    pub total: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRequestBody {
    pub status: Option<RequestStatus>,
    #[validate(length(max = 5000))]
    pub admin_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RequestEnvelope {
    pub message: &'static str,
    pub request: ServiceRequest,
}

use async_trait::async_trait;

use super::model::{RequestStatus, ServiceRequest};
use crate::error::Result;

#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn insert(&self, request: &ServiceRequest) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceRequest>>;
    /// Newest first. `service_ids: None` means every service.
    async fn list(
        &self,
        service_ids: Option<&[String]>,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ServiceRequest>>;
    async fn update(&self, request: &ServiceRequest) -> Result<bool>;
    /// Returns how many requests were removed.
    async fn delete_for_service(&self, service_id: &str) -> Result<u64>;
}

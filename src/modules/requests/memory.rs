use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::interface::RequestRepository;
use super::model::{RequestStatus, ServiceRequest};
use crate::error::Result;

#[derive(Default)]
pub struct MemoryRequestRepository {
    requests: Mutex<HashMap<String, ServiceRequest>>, // key: id
}

#[async_trait]
impl RequestRepository for MemoryRequestRepository {
    async fn insert(&self, request: &ServiceRequest) -> Result<()> {
        let mut requests = self.requests.lock().unwrap();
        requests.insert(request.id.clone(), request.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceRequest>> {
        let requests = self.requests.lock().unwrap();
        Ok(requests.get(id).cloned())
    }

    async fn list(
        &self,
        service_ids: Option<&[String]>,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ServiceRequest>> {
        let requests = self.requests.lock().unwrap();
        let mut list: Vec<ServiceRequest> = requests
            .values()
            .filter(|r| service_ids.map_or(true, |ids| ids.contains(&r.service_id)))
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn update(&self, request: &ServiceRequest) -> Result<bool> {
        let mut requests = self.requests.lock().unwrap();
        match requests.get_mut(&request.id) {
            Some(existing) => {
                existing.status = request.status;
                existing.admin_notes = request.admin_notes.clone();
                existing.updated_at = request.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_for_service(&self, service_id: &str) -> Result<u64> {
        let mut requests = self.requests.lock().unwrap();
        let before = requests.len();
        requests.retain(|_, r| r.service_id != service_id);
        Ok((before - requests.len()) as u64)
    }
}

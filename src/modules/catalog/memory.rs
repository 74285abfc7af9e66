use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::interface::CatalogRepository;
use super::model::Service;
use crate::error::{AppError, Result};

#[derive(Default)]
pub struct MemoryCatalogRepository {
    services: Mutex<HashMap<String, Service>>, // key: id
}

fn sorted(mut services: Vec<Service>) -> Vec<Service> {
    services.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    services
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn list(&self, active_only: bool) -> Result<Vec<Service>> {
        let services = self.services.lock().unwrap();
        Ok(sorted(
            services
                .values()
                .filter(|s| !active_only || s.is_active)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Service>> {
        let services = self.services.lock().unwrap();
        Ok(sorted(
            services
                .values()
                .filter(|s| s.created_by == owner_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Service>> {
        let services = self.services.lock().unwrap();
        Ok(services.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Service>> {
        let services = self.services.lock().unwrap();
        Ok(services.values().find(|s| s.slug == slug).cloned())
    }

    async fn insert(&self, service: &Service) -> Result<()> {
        let mut services = self.services.lock().unwrap();
        if services.values().any(|s| s.slug == service.slug) {
            return Err(AppError::Conflict("Slug already exists".into()));
        }
        services.insert(service.id.clone(), service.clone());
        Ok(())
    }

    async fn update(&self, service: &Service) -> Result<bool> {
        let mut services = self.services.lock().unwrap();
        if services
            .values()
            .any(|s| s.slug == service.slug && s.id != service.id)
        {
            return Err(AppError::Conflict("Slug already exists".into()));
        }
        match services.get_mut(&service.id) {
            Some(existing) => {
                *existing = service.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut services = self.services.lock().unwrap();
        Ok(services.remove(id).is_some())
    }
}

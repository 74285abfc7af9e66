use async_trait::async_trait;

use super::model::Service;
use crate::error::Result;

/// Listings are ordered by `sort_order`, then `created_at`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list(&self, active_only: bool) -> Result<Vec<Service>>;
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Service>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Service>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Service>>;
    /// `Conflict` when the slug is taken.
    async fn insert(&self, service: &Service) -> Result<()>;
    /// Writes every mutable column; `Conflict` when the slug is taken.
    async fn update(&self, service: &Service) -> Result<bool>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

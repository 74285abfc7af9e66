use async_trait::async_trait;

use super::model::ContactMessage;
use crate::error::Result;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert(&self, message: &ContactMessage) -> Result<()>;
    /// Newest first.
    async fn list(&self, unread_only: bool) -> Result<Vec<ContactMessage>>;
    async fn mark_read(&self, id: &str) -> Result<bool>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

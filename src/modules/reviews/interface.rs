use async_trait::async_trait;

use super::model::{Review, ReviewStatus};
use crate::error::Result;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn insert(&self, review: &Review) -> Result<()>;
    /// Newest first.
    async fn list(&self, status: Option<ReviewStatus>) -> Result<Vec<Review>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Review>>;
    async fn update_status(&self, id: &str, status: ReviewStatus) -> Result<bool>;
    async fn delete(&self, id: &str) -> Result<bool>;
}

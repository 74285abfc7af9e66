use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use super::interface::ReviewRepository;
use super::model::{Review, ReviewStatus};
use crate::error::Result;

#[derive(Default)]
pub struct MemoryReviewRepository {
    reviews: Mutex<HashMap<String, Review>>, // key: id
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn insert(&self, review: &Review) -> Result<()> {
        let mut reviews = self.reviews.lock().unwrap();
        reviews.insert(review.id.clone(), review.clone());
        Ok(())
    }

    async fn list(&self, status: Option<ReviewStatus>) -> Result<Vec<Review>> {
        let reviews = self.reviews.lock().unwrap();
        let mut list: Vec<Review> = reviews
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>> {
        let reviews = self.reviews.lock().unwrap();
        Ok(reviews.get(id).cloned())
    }

    async fn update_status(&self, id: &str, status: ReviewStatus) -> Result<bool> {
        let mut reviews = self.reviews.lock().unwrap();
        match reviews.get_mut(id) {
            Some(review) => {
                review.status = status;
                review.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut reviews = self.reviews.lock().unwrap();
        Ok(reviews.remove(id).is_some())
    }
}

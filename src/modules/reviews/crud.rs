use async_trait::async_trait;
use chrono::Utc;

use super::interface::ReviewRepository;
use super::model::{Review, ReviewStatus};
use crate::config::DbPool;
use crate::error::Result;

pub struct MySqlReviewRepository {
    pool: DbPool,
}

impl MySqlReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn insert(&self, review: &Review) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, name, email, company, rating, comment, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&review.id)
        .bind(&review.name)
        .bind(&review.email)
        .bind(&review.company)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.status.as_str())
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, status: Option<ReviewStatus>) -> Result<Vec<Review>> {
        let reviews = match status {
            Some(status) => {
                sqlx::query_as::<_, Review>(
                    "SELECT * FROM reviews WHERE status = ? ORDER BY created_at DESC",
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(reviews)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>> {
        Ok(sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_status(&self, id: &str, status: ReviewStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE reviews SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

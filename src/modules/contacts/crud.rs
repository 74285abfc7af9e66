use async_trait::async_trait;

use super::interface::ContactRepository;
use super::model::ContactMessage;
use crate::config::DbPool;
use crate::error::Result;

pub struct MySqlContactRepository {
    pool: DbPool,
}

impl MySqlContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for MySqlContactRepository {
    async fn insert(&self, message: &ContactMessage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO contacts (id, name, email, phone, subject, message, is_read, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.phone)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.is_read)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, unread_only: bool) -> Result<Vec<ContactMessage>> {
        let sql = if unread_only {
            "SELECT * FROM contacts WHERE is_read = FALSE ORDER BY created_at DESC"
        } else {
            "SELECT * FROM contacts ORDER BY created_at DESC"
        };

        Ok(sqlx::query_as::<_, ContactMessage>(sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn mark_read(&self, id: &str) -> Result<bool> {
        // MySQL reports zero affected rows when the flag is already set.
        let result = sqlx::query("UPDATE contacts SET is_read = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM contacts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(exists.is_some())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

use async_trait::async_trait;
use sqlx::{MySql, QueryBuilder};

use super::interface::RequestRepository;
use super::model::{RequestStatus, ServiceRequest};
use crate::config::DbPool;
use crate::error::Result;

pub struct MySqlRequestRepository {
    pool: DbPool,
}

impl MySqlRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestRepository for MySqlRequestRepository {
    async fn insert(&self, request: &ServiceRequest) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO service_requests (
                id, service_id, full_name, email, phone, company, country,
                message, status, admin_notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.id)
        .bind(&request.service_id)
        .bind(&request.full_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.company)
        .bind(&request.country)
        .bind(&request.message)
        .bind(request.status.as_str())
        .bind(&request.admin_notes)
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceRequest>> {
        Ok(
            sqlx::query_as::<_, ServiceRequest>("SELECT * FROM service_requests WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list(
        &self,
        service_ids: Option<&[String]>,
        status: Option<RequestStatus>,
    ) -> Result<Vec<ServiceRequest>> {
        let mut query = QueryBuilder::<MySql>::new("SELECT * FROM service_requests WHERE 1 = 1");

        if let Some(ids) = service_ids {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            query.push(" AND service_id IN (");
            let mut separated = query.separated(", ");
            for id in ids {
                separated.push_bind(id.clone());
            }
            separated.push_unseparated(")");
        }

        if let Some(status) = status {
            query.push(" AND status = ").push_bind(status.as_str());
        }

        query.push(" ORDER BY created_at DESC");

        Ok(query
            .build_query_as::<ServiceRequest>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update(&self, request: &ServiceRequest) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE service_requests SET status = ?, admin_notes = ?, updated_at = ? WHERE id = ?",
        )
        .bind(request.status.as_str())
        .bind(&request.admin_notes)
        .bind(request.updated_at)
        .bind(&request.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_service(&self, service_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM service_requests WHERE service_id = ?")
            .bind(service_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::interface::CatalogRepository;
use super::model::Service;
use crate::config::DbPool;
use crate::error::{conflict_on_duplicate, Result};
use crate::locale::LocalizedText;

const SLUG_TAKEN: &str = "Slug already exists";

#[derive(Debug, FromRow)]
struct ServiceRow {
    id: String,
    slug: String,
    title_en: String,
    title_ar: String,
    summary_en: String,
    summary_ar: String,
    description_en: String,
    description_ar: String,
    icon: Option<String>,
    sort_order: i32,
    is_active: bool,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: LocalizedText::new(row.title_en, row.title_ar),
            summary: LocalizedText::new(row.summary_en, row.summary_ar),
            description: LocalizedText::new(row.description_en, row.description_ar),
            icon: row.icon,
            sort_order: row.sort_order,
            is_active: row.is_active,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct MySqlCatalogRepository {
    pool: DbPool,
}

impl MySqlCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for MySqlCatalogRepository {
    async fn list(&self, active_only: bool) -> Result<Vec<Service>> {
        let sql = if active_only {
            "SELECT * FROM services WHERE is_active = TRUE ORDER BY sort_order, created_at"
        } else {
            "SELECT * FROM services ORDER BY sort_order, created_at"
        };

        let rows = sqlx::query_as::<_, ServiceRow>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Service>> {
        let rows = sqlx::query_as::<_, ServiceRow>(
            "SELECT * FROM services WHERE created_by = ? ORDER BY sort_order, created_at",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Service>> {
        Ok(
            sqlx::query_as::<_, ServiceRow>("SELECT * FROM services WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .map(Service::from),
        )
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Service>> {
        Ok(
            sqlx::query_as::<_, ServiceRow>("SELECT * FROM services WHERE slug = ?")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?
                .map(Service::from),
        )
    }

    async fn insert(&self, service: &Service) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO services (
                id, slug, title_en, title_ar, summary_en, summary_ar,
                description_en, description_ar, icon, sort_order, is_active,
                created_by, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&service.id)
        .bind(&service.slug)
        .bind(&service.title.en)
        .bind(&service.title.ar)
        .bind(&service.summary.en)
        .bind(&service.summary.ar)
        .bind(&service.description.en)
        .bind(&service.description.ar)
        .bind(&service.icon)
        .bind(service.sort_order)
        .bind(service.is_active)
        .bind(&service.created_by)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, SLUG_TAKEN))?;

        Ok(())
    }

    async fn update(&self, service: &Service) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE services SET
                slug = ?, title_en = ?, title_ar = ?, summary_en = ?, summary_ar = ?,
                description_en = ?, description_ar = ?, icon = ?, sort_order = ?,
                is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&service.slug)
        .bind(&service.title.en)
        .bind(&service.title.ar)
        .bind(&service.summary.en)
        .bind(&service.summary.ar)
        .bind(&service.description.en)
        .bind(&service.description.ar)
        .bind(&service.icon)
        .bind(service.sort_order)
        .bind(service.is_active)
        .bind(service.updated_at)
        .bind(&service.id)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, SLUG_TAKEN))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

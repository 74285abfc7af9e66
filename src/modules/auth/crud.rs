use async_trait::async_trait;
use chrono::Utc;

use super::interface::{AccountRepository, OtpRepository, PasswordResetRepository};
use super::model::{
    AdminAccount, AdminStatus, OtpChallenge, PasswordResetChallenge, SuperAdminAccount,
};
use crate::config::DbPool;
use crate::error::{conflict_on_duplicate, Result};

pub struct MySqlAccountRepository {
    pool: DbPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_super_admin_by_email(&self, email: &str) -> Result<Option<SuperAdminAccount>> {
        Ok(
            sqlx::query_as::<_, SuperAdminAccount>("SELECT * FROM super_admin WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        Ok(
            sqlx::query_as::<_, AdminAccount>("SELECT * FROM admins WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_admin_by_id(&self, id: &str) -> Result<Option<AdminAccount>> {
        Ok(
            sqlx::query_as::<_, AdminAccount>("SELECT * FROM admins WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_admins(&self, status: Option<AdminStatus>) -> Result<Vec<AdminAccount>> {
        let admins = match status {
            Some(status) => {
                sqlx::query_as::<_, AdminAccount>(
                    "SELECT * FROM admins WHERE status = ? ORDER BY created_at DESC",
                )
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AdminAccount>("SELECT * FROM admins ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(admins)
    }

    async fn insert_admin(&self, admin: &AdminAccount) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, name, email, password_hash, status, rejection_reason, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&admin.id)
        .bind(&admin.name)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.status.as_str())
        .bind(&admin.rejection_reason)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, "Email already exists"))?;

        Ok(())
    }

    async fn insert_super_admin(&self, account: &SuperAdminAccount) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO super_admin (id, name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, "Email already exists"))?;

        Ok(())
    }

    async fn update_admin_status(
        &self,
        id: &str,
        status: AdminStatus,
        rejection_reason: Option<&str>,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE admins SET status = ?, rejection_reason = ?, updated_at = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(rejection_reason)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_admin_profile(&self, id: &str, name: &str, email: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE admins SET name = ?, email = ?, updated_at = ? WHERE id = ?")
            .bind(name)
            .bind(email)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| conflict_on_duplicate(e, "Email already exists"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_admin_password(&self, email: &str, password_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE admins SET password_hash = ?, updated_at = ? WHERE email = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_super_admin_password(&self, email: &str, password_hash: &str) -> Result<bool> {
        let result =
            sqlx::query("UPDATE super_admin SET password_hash = ?, updated_at = ? WHERE email = ?")
                .bind(password_hash)
                .bind(Utc::now())
                .bind(email)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_admin(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM admins WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct MySqlOtpRepository {
    pool: DbPool,
}

impl MySqlOtpRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn upsert(&self, challenge: &OtpChallenge) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO admin_otps (email, otp_hash, attempts, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                otp_hash = VALUES(otp_hash),
                attempts = VALUES(attempts),
                expires_at = VALUES(expires_at),
                created_at = VALUES(created_at)
            "#,
        )
        .bind(&challenge.email)
        .bind(&challenge.otp_hash)
        .bind(challenge.attempts)
        .bind(challenge.expires_at)
        .bind(challenge.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<OtpChallenge>> {
        Ok(
            sqlx::query_as::<_, OtpChallenge>("SELECT * FROM admin_otps WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn consume_attempt(&self, email: &str, max_attempts: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE admin_otps SET attempts = attempts + 1 WHERE email = ? AND attempts < ?",
        )
        .bind(email)
        .bind(max_attempts)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, email: &str) -> Result<()> {
        sqlx::query("DELETE FROM admin_otps WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

pub struct MySqlPasswordResetRepository {
    pool: DbPool,
}

impl MySqlPasswordResetRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasswordResetRepository for MySqlPasswordResetRepository {
    async fn upsert(&self, challenge: &PasswordResetChallenge) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO password_resets (email, token_hash, expires_at, created_at)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                token_hash = VALUES(token_hash),
                expires_at = VALUES(expires_at),
                created_at = VALUES(created_at)
            "#,
        )
        .bind(&challenge.email)
        .bind(&challenge.token_hash)
        .bind(challenge.expires_at)
        .bind(challenge.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<PasswordResetChallenge>> {
        Ok(sqlx::query_as::<_, PasswordResetChallenge>(
            "SELECT * FROM password_resets WHERE token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn claim(&self, email: &str, token_hash: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM password_resets WHERE email = ? AND token_hash = ?")
            .bind(email)
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, email: &str) -> Result<()> {
        sqlx::query("DELETE FROM password_resets WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

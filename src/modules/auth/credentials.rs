use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::interface::AccountRepository;
use super::model::{Account, AdminAccount, AdminStatus, Identity, SuperAdminAccount};
use crate::error::{AppError, Result};
use crate::services::hashing;

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Argon2 is CPU-bound; keep it off the async workers.
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hashing::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let (password, hash) = (password.to_string(), hash.to_string());
    tokio::task::spawn_blocking(move || hashing::verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)
}

/// Whether a super-admin decision may move `admin` to `target`. Writes
/// nothing, so callers can check before touching the record.
pub fn check_decision(admin: &AdminAccount, target: AdminStatus) -> Result<()> {
    match (target, admin.status) {
        (AdminStatus::Pending | AdminStatus::Verified, _) => Err(AppError::validation(
            "Status can only be changed to approved or rejected",
        )),
        (AdminStatus::Approved, AdminStatus::Pending) => Err(AppError::validation(
            "Admin has not verified their email yet",
        )),
        _ => Ok(()),
    }
}

/// Account lookup and mutation on top of `AccountRepository`, enforcing
/// email uniqueness across admins and super-admins.
pub struct CredentialStore<'a> {
    accounts: &'a dyn AccountRepository,
}

impl<'a> CredentialStore<'a> {
    pub fn new(accounts: &'a dyn AccountRepository) -> Self {
        Self { accounts }
    }

    /// Super-admins are checked first; first match wins.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        if let Some(account) = self.accounts.find_super_admin_by_email(email).await? {
            return Ok(Some(Account::SuperAdmin(account)));
        }
        Ok(self
            .accounts
            .find_admin_by_email(email)
            .await?
            .map(Account::Admin))
    }

    pub async fn email_taken(&self, email: &str) -> Result<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    pub async fn find_admin(&self, id: &str) -> Result<AdminAccount> {
        self.accounts
            .find_admin_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Admin"))
    }

    pub async fn list_admins(&self, status: Option<AdminStatus>) -> Result<Vec<AdminAccount>> {
        self.accounts.list_admins(status).await
    }

    #[instrument(skip_all, fields(email = %email, status = status.as_str()))]
    pub async fn create_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
        status: AdminStatus,
    ) -> Result<AdminAccount> {
        if self.email_taken(email).await? {
            return Err(AppError::Conflict("Email already exists".into()));
        }

        let now = Utc::now();
        let admin = AdminAccount {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).await?,
            status,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };

        self.accounts.insert_admin(&admin).await?;
        info!(admin_id = %admin.id, "admin account created");
        Ok(admin)
    }

    #[instrument(skip_all, fields(email = %email))]
    pub async fn create_super_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SuperAdminAccount> {
        if self.email_taken(email).await? {
            return Err(AppError::Conflict("Email already exists".into()));
        }

        let now = Utc::now();
        let account = SuperAdminAccount {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).await?,
            created_at: now,
            updated_at: now,
        };

        self.accounts.insert_super_admin(&account).await?;
        info!(super_admin_id = %account.id, "super-admin account created");
        Ok(account)
    }

    /// Email + password check only; status gating is the caller's job.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account> {
        let account = self
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, account.password_hash()).await? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Stores a new password for whichever account kind owns `email`.
    pub async fn update_password(&self, email: &str, new_password: &str) -> Result<()> {
        let account = self
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound("Account"))?;
        let password_hash = hash_password(new_password).await?;
        self.store_password_hash(&account, &password_hash).await
    }

    /// Writes an already hashed password to `account`'s table.
    pub async fn store_password_hash(&self, account: &Account, password_hash: &str) -> Result<()> {
        let email = account.email();
        let updated = match account {
            Account::SuperAdmin(_) => {
                self.accounts
                    .update_super_admin_password(email, password_hash)
                    .await?
            }
            Account::Admin(_) => self.accounts.update_admin_password(email, password_hash).await?,
        };

        if !updated {
            return Err(AppError::NotFound("Account"));
        }
        info!(email = %email, "password updated");
        Ok(())
    }

    #[instrument(skip_all, fields(account_id = %identity.id))]
    pub async fn change_password(
        &self,
        identity: &Identity,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let account = self
            .find_by_email(&identity.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(current_password, account.password_hash()).await? {
            return Err(AppError::validation("Current password is incorrect"));
        }
        if current_password == new_password {
            return Err(AppError::validation(
                "New password must differ from the current password",
            ));
        }

        self.update_password(account.email(), new_password).await
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: AdminStatus,
        reason: Option<&str>,
    ) -> Result<AdminAccount> {
        if !self.accounts.update_admin_status(id, status, reason).await? {
            return Err(AppError::NotFound("Admin"));
        }
        self.find_admin(id).await
    }

    /// `verified | rejected -> approved`. Unverified admins cannot be approved.
    pub async fn approve(&self, id: &str) -> Result<AdminAccount> {
        let admin = self.find_admin(id).await?;
        check_decision(&admin, AdminStatus::Approved)?;
        if admin.status == AdminStatus::Approved {
            return Ok(admin);
        }
        self.update_status(id, AdminStatus::Approved, None).await
    }

    pub async fn reject(&self, id: &str, reason: Option<&str>) -> Result<AdminAccount> {
        // Existence check first so unknown ids surface as 404.
        self.find_admin(id).await?;
        self.update_status(id, AdminStatus::Rejected, reason).await
    }

    pub async fn update_profile(
        &self,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<AdminAccount> {
        let admin = self.find_admin(id).await?;
        let name = name.map(str::trim).unwrap_or(&admin.name);
        let email = email.unwrap_or(&admin.email);

        if email != admin.email && self.email_taken(email).await? {
            return Err(AppError::Conflict("Email already exists".into()));
        }

        if !self.accounts.update_admin_profile(id, name, email).await? {
            return Err(AppError::NotFound("Admin"));
        }
        self.find_admin(id).await
    }

    pub async fn delete_admin(&self, id: &str) -> Result<AdminAccount> {
        let admin = self.find_admin(id).await?;
        if !self.accounts.delete_admin(id).await? {
            return Err(AppError::NotFound("Admin"));
        }
        Ok(admin)
    }
}

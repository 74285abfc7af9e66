//! In-memory repositories for tests and database-less local runs.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use super::interface::{AccountRepository, OtpRepository, PasswordResetRepository};
use super::model::{
    AdminAccount, AdminStatus, OtpChallenge, PasswordResetChallenge, SuperAdminAccount,
};
use crate::error::{AppError, Result};

#[derive(Default)]
pub struct MemoryAccountRepository {
    admins: Mutex<HashMap<String, AdminAccount>>,            // key: id
    super_admins: Mutex<HashMap<String, SuperAdminAccount>>, // key: email
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_super_admin_by_email(&self, email: &str) -> Result<Option<SuperAdminAccount>> {
        let super_admins = self.super_admins.lock().unwrap();
        Ok(super_admins.get(email).cloned())
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        let admins = self.admins.lock().unwrap();
        Ok(admins.values().find(|a| a.email == email).cloned())
    }

    async fn find_admin_by_id(&self, id: &str) -> Result<Option<AdminAccount>> {
        let admins = self.admins.lock().unwrap();
        Ok(admins.get(id).cloned())
    }

    async fn list_admins(&self, status: Option<AdminStatus>) -> Result<Vec<AdminAccount>> {
        let admins = self.admins.lock().unwrap();
        let mut list: Vec<AdminAccount> = admins
            .values()
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn insert_admin(&self, admin: &AdminAccount) -> Result<()> {
        let mut admins = self.admins.lock().unwrap();
        if admins.values().any(|a| a.email == admin.email) {
            return Err(AppError::Conflict("Email already exists".into()));
        }
        admins.insert(admin.id.clone(), admin.clone());
        Ok(())
    }

    async fn insert_super_admin(&self, account: &SuperAdminAccount) -> Result<()> {
        let mut super_admins = self.super_admins.lock().unwrap();
        if super_admins.contains_key(&account.email) {
            return Err(AppError::Conflict("Email already exists".into()));
        }
        super_admins.insert(account.email.clone(), account.clone());
        Ok(())
    }

    async fn update_admin_status(
        &self,
        id: &str,
        status: AdminStatus,
        rejection_reason: Option<&str>,
    ) -> Result<bool> {
        let mut admins = self.admins.lock().unwrap();
        match admins.get_mut(id) {
            Some(admin) => {
                admin.status = status;
                admin.rejection_reason = rejection_reason.map(str::to_string);
                admin.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_admin_profile(&self, id: &str, name: &str, email: &str) -> Result<bool> {
        let mut admins = self.admins.lock().unwrap();
        if admins.values().any(|a| a.email == email && a.id != id) {
            return Err(AppError::Conflict("Email already exists".into()));
        }
        match admins.get_mut(id) {
            Some(admin) => {
                admin.name = name.to_string();
                admin.email = email.to_string();
                admin.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_admin_password(&self, email: &str, password_hash: &str) -> Result<bool> {
        let mut admins = self.admins.lock().unwrap();
        match admins.values_mut().find(|a| a.email == email) {
            Some(admin) => {
                admin.password_hash = password_hash.to_string();
                admin.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_super_admin_password(&self, email: &str, password_hash: &str) -> Result<bool> {
        let mut super_admins = self.super_admins.lock().unwrap();
        match super_admins.get_mut(email) {
            Some(account) => {
                account.password_hash = password_hash.to_string();
                account.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_admin(&self, id: &str) -> Result<bool> {
        let mut admins = self.admins.lock().unwrap();
        Ok(admins.remove(id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryOtpRepository {
    challenges: Mutex<HashMap<String, OtpChallenge>>, // key: email
}

#[async_trait]
impl OtpRepository for MemoryOtpRepository {
    async fn upsert(&self, challenge: &OtpChallenge) -> Result<()> {
        let mut challenges = self.challenges.lock().unwrap();
        challenges.insert(challenge.email.clone(), challenge.clone());
        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<OtpChallenge>> {
        let challenges = self.challenges.lock().unwrap();
        Ok(challenges.get(email).cloned())
    }

    async fn consume_attempt(&self, email: &str, max_attempts: i32) -> Result<bool> {
        let mut challenges = self.challenges.lock().unwrap();
        match challenges.get_mut(email) {
            Some(c) if c.attempts < max_attempts => {
                c.attempts += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, email: &str) -> Result<()> {
        let mut challenges = self.challenges.lock().unwrap();
        challenges.remove(email);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPasswordResetRepository {
    challenges: Mutex<HashMap<String, PasswordResetChallenge>>, // key: email
}

#[async_trait]
impl PasswordResetRepository for MemoryPasswordResetRepository {
    async fn upsert(&self, challenge: &PasswordResetChallenge) -> Result<()> {
        let mut challenges = self.challenges.lock().unwrap();
        challenges.insert(challenge.email.clone(), challenge.clone());
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<PasswordResetChallenge>> {
        let challenges = self.challenges.lock().unwrap();
        Ok(challenges
            .values()
            .find(|c| c.token_hash == token_hash)
            .cloned())
    }

    async fn claim(&self, email: &str, token_hash: &str) -> Result<bool> {
        let mut challenges = self.challenges.lock().unwrap();
        match challenges.get(email) {
            Some(c) if c.token_hash == token_hash => {
                challenges.remove(email);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, email: &str) -> Result<()> {
        let mut challenges = self.challenges.lock().unwrap();
        challenges.remove(email);
        Ok(())
    }
}

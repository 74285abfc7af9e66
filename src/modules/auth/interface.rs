use async_trait::async_trait;

use super::model::{
    AdminAccount, AdminStatus, Identity, OtpChallenge, PasswordResetChallenge, SuperAdminAccount,
};
use crate::error::Result;
use crate::services::jwt::Claims;

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Persistence for both account kinds. Implementations only enforce
/// per-table email uniqueness; the cross-table invariant lives in
/// `CredentialStore`.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_super_admin_by_email(&self, email: &str) -> Result<Option<SuperAdminAccount>>;
    async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminAccount>>;
    async fn find_admin_by_id(&self, id: &str) -> Result<Option<AdminAccount>>;
    async fn list_admins(&self, status: Option<AdminStatus>) -> Result<Vec<AdminAccount>>;
    async fn insert_admin(&self, admin: &AdminAccount) -> Result<()>;
    async fn insert_super_admin(&self, account: &SuperAdminAccount) -> Result<()>;
    async fn update_admin_status(
        &self,
        id: &str,
        status: AdminStatus,
        rejection_reason: Option<&str>,
    ) -> Result<bool>;
    async fn update_admin_profile(&self, id: &str, name: &str, email: &str) -> Result<bool>;
    async fn update_admin_password(&self, email: &str, password_hash: &str) -> Result<bool>;
    async fn update_super_admin_password(&self, email: &str, password_hash: &str) -> Result<bool>;
    async fn delete_admin(&self, id: &str) -> Result<bool>;
}

/// One live OTP challenge per email; `upsert` supersedes.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    async fn upsert(&self, challenge: &OtpChallenge) -> Result<()>;
    async fn find(&self, email: &str) -> Result<Option<OtpChallenge>>;
    /// Spends one attempt on the challenge for `email`. Returns `false`
    /// when `max_attempts` are already spent or no challenge exists.
    async fn consume_attempt(&self, email: &str, max_attempts: i32) -> Result<bool>;
    async fn delete(&self, email: &str) -> Result<()>;
}

/// One live reset challenge per email; `upsert` supersedes.
#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    async fn upsert(&self, challenge: &PasswordResetChallenge) -> Result<()>;
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<PasswordResetChallenge>>;
    /// Deletes the challenge for `email` only while it still carries
    /// `token_hash`. Exactly one caller can observe `true`.
    async fn claim(&self, email: &str, token_hash: &str) -> Result<bool>;
    async fn delete(&self, email: &str) -> Result<()>;
}

// =============================================================================
// IDENTITY RESOLUTION
// =============================================================================

/// Maps verified token claims to an identity that is eligible *right now*.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, claims: &Claims) -> Result<Option<Identity>>;
}

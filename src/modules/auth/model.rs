use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Visitor,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visitor => "visitor",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

/// Approval lifecycle of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatus {
    Pending,
    Verified,
    Approved,
    Rejected,
}

impl AdminStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown status {0:?}")]
pub struct UnknownStatus(pub String);

impl TryFrom<String> for AdminStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(UnknownStatus(value)),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AdminAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub status: AdminStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SuperAdminAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Either kind of account, as resolved by email.
#[derive(Debug, Clone)]
pub enum Account {
    SuperAdmin(SuperAdminAccount),
    Admin(AdminAccount),
}

impl Account {
    pub fn id(&self) -> &str {
        match self {
            Self::SuperAdmin(a) => &a.id,
            Self::Admin(a) => &a.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::SuperAdmin(a) => &a.email,
            Self::Admin(a) => &a.email,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::SuperAdmin(a) => &a.name,
            Self::Admin(a) => &a.name,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Self::SuperAdmin(a) => &a.password_hash,
            Self::Admin(a) => &a.password_hash,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::SuperAdmin(_) => Role::SuperAdmin,
            Self::Admin(_) => Role::Admin,
        }
    }

    /// Super-admins are implicitly approved.
    pub fn status(&self) -> AdminStatus {
        match self {
            Self::SuperAdmin(_) => AdminStatus::Approved,
            Self::Admin(a) => a.status,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct OtpChallenge {
    pub email: String,
    pub otp_hash: String,
    /// Verification attempts spent on this code.
    pub attempts: i32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetChallenge {
    pub email: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A request's resolved, currently-eligible identity.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

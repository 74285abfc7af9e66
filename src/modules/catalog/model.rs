use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::locale::LocalizedText;
use crate::modules::auth::model::Identity;

/// A catalog entry, stored in both site languages.
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: String,
    pub slug: String,
    pub title: LocalizedText,
    pub summary: LocalizedText,
    pub description: LocalizedText,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    /// Super-admins manage every service; admins only the ones they created.
    pub fn is_managed_by(&self, identity: &Identity) -> bool {
        identity.is_super_admin() || self.created_by == identity.id
    }
}

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use super::model::Service;
use crate::locale::{require_both_languages, require_english, Locale, LocalizedText};

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"));

// =============================================================================
// PUBLIC
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
    /// Honoured for staff only.
    #[serde(default)]
    pub include_inactive: bool,
}

impl LangQuery {
    pub fn locale(&self) -> Locale {
        Locale::from_tag(self.lang.as_deref())
    }
}

/// A service rendered in a single language.
#[derive(Debug, Serialize)]
pub struct LocalizedService {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub lang: Locale,
    pub dir: &'static str,
}

impl LocalizedService {
    pub fn render(service: &Service, locale: Locale) -> Self {
        Self {
            id: service.id.clone(),
            slug: service.slug.clone(),
            title: service.title.get(locale).to_string(),
            summary: service.summary.get(locale).to_string(),
            description: service.description.get(locale).to_string(),
            icon: service.icon.clone(),
            sort_order: service.sort_order,
            is_active: service.is_active,
            lang: locale,
            dir: locale.dir(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceListResponse {
    pub services: Vec<LocalizedService>,
    pub total: usize,
    pub lang: Locale,
    pub dir: &'static str,
}

// =============================================================================
// ADMIN
// =============================================================================

#[derive(Debug, Serialize)]
pub struct AdminServiceListResponse {
    pub services: Vec<Service>,
    pub total: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(
        length(min = 2, max = 120),
        regex(path = *SLUG_RE, message = "Slug may only contain lowercase letters, digits and single dashes")
    )]
    pub slug: String,
    #[validate(custom(function = "require_both_languages"))]
    pub title: LocalizedText,
    #[validate(custom(function = "require_english"))]
    pub summary: LocalizedText,
    #[validate(custom(function = "require_english"))]
    pub description: LocalizedText,
    #[validate(length(max = 120))]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    #[validate(
        length(min = 2, max = 120),
        regex(path = *SLUG_RE, message = "Slug may only contain lowercase letters, digits and single dashes")
    )]
    pub slug: Option<String>,
    #[validate(custom(function = "require_both_languages"))]
    pub title: Option<LocalizedText>,
    #[validate(custom(function = "require_english"))]
    pub summary: Option<LocalizedText>,
    #[validate(custom(function = "require_english"))]
    pub description: Option<LocalizedText>,
    #[validate(length(max = 120))]
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ServiceEnvelope {
    pub message: &'static str,
    pub service: Service,
}

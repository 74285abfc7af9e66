use serde::{Deserialize, Serialize};
use validator::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// Lenient: `ar`, `AR`, `ar-SA` select Arabic; anything else is English.
    pub fn from_tag(tag: Option<&str>) -> Self {
        let prefix = tag.map(str::trim).and_then(|t| t.get(..2));
        match prefix {
            Some(p) if p.eq_ignore_ascii_case("ar") => Self::Ar,
            _ => Self::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Text direction hint for clients.
    pub fn dir(&self) -> &'static str {
        match self {
            Self::En => "ltr",
            Self::Ar => "rtl",
        }
    }
}

/// A string kept in both site languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default)]
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: ar.into(),
        }
    }

    /// Arabic falls back to English when left blank.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar if !self.ar.trim().is_empty() => &self.ar,
            _ => &self.en,
        }
    }

    pub fn trimmed(&self) -> Self {
        Self::new(self.en.trim(), self.ar.trim())
    }
}

pub fn require_both_languages(text: &LocalizedText) -> Result<(), ValidationError> {
    if text.en.trim().is_empty() || text.ar.trim().is_empty() {
        return Err(ValidationError::new("bilingual")
            .with_message("both English and Arabic text are required".into()));
    }
    Ok(())
}

pub fn require_english(text: &LocalizedText) -> Result<(), ValidationError> {
    if text.en.trim().is_empty() {
        return Err(ValidationError::new("english").with_message("English text is required".into()));
    }
    Ok(())
}

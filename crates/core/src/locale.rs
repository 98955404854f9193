//! Supported locales and the two-locale string record used by localized
//! game fields and legal texts.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A locale the storefront publishes content in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ko,
    En,
}

/// Every supported locale, in display order.
pub const SUPPORTED_LOCALES: [Locale; 2] = [Locale::Ko, Locale::En];

impl Locale {
    /// Parse a locale key (`"ko"` / `"en"`).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "ko" => Ok(Self::Ko),
            "en" => Ok(Self::En),
            _ => Err(CoreError::Validation(format!(
                "Unsupported locale '{s}'. Must be one of: ko, en"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string stored once per supported locale.
///
/// Both keys are always present; a missing key in incoming JSON
/// deserializes to an empty string rather than being dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    #[serde(default)]
    pub ko: String,
    #[serde(default)]
    pub en: String,
}

impl Localized {
    pub fn new(ko: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ko: ko.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ko => &self.ko,
            Locale::En => &self.en,
        }
    }

    /// Replace one locale's value, leaving the other untouched.
    pub fn set(&mut self, locale: Locale, value: impl Into<String>) {
        match locale {
            Locale::Ko => self.ko = value.into(),
            Locale::En => self.en = value.into(),
        }
    }

    /// `true` when every locale has non-blank text.
    pub fn is_complete(&self) -> bool {
        SUPPORTED_LOCALES
            .iter()
            .all(|l| !self.get(*l).trim().is_empty())
    }

    /// Locales whose text is blank.
    pub fn missing_locales(&self) -> Vec<Locale> {
        SUPPORTED_LOCALES
            .iter()
            .copied()
            .filter(|l| self.get(*l).trim().is_empty())
            .collect()
    }
}

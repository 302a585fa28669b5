//! # Locales Feature
//!
//! English and Farsi message catalog with `{placeholder}` substitution.
//! Lookups fall back to English, then to a visible `MISSING_KEY:` marker.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Role change and partner event strings
//! - 1.1.0: Farsi catalog
//! - 1.0.0: English catalog

mod en;
mod fa;

use std::fmt;
use std::str::FromStr;

use crate::core::{LunaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Farsi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Farsi];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Farsi => "fa",
        }
    }

    /// Name of the language in itself
    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Farsi => "فارسی",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Language::English => "🇬🇧",
            Language::Farsi => "🇮🇷",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LunaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "en" => Ok(Language::English),
            "fa" => Ok(Language::Farsi),
            other => Err(LunaError::validation(format!("unknown language '{other}'"))),
        }
    }
}

fn lookup(key: &str, lang: Language) -> Option<&'static str> {
    match lang {
        Language::English => en::get(key),
        Language::Farsi => fa::get(key),
    }
}

/// Look up a message
pub fn t(key: &str, lang: Language) -> String {
    lookup(key, lang)
        .or_else(|| en::get(key))
        .map(str::to_string)
        .unwrap_or_else(|| format!("MISSING_KEY: {key}"))
}

/// Look up a message and fill in `{placeholder}`s
pub fn t_with(key: &str, lang: Language, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(t(key, lang), |text, (placeholder, value)| {
            text.replace(&format!("{{{placeholder}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_lookup_in_both_languages() {
        assert_eq!(t("settings_language", Language::English), "🌐 Language");
        assert_eq!(t("settings_language", Language::Farsi), "🌐 زبان");
    }

    #[test]
    fn test_placeholders() {
        let text = t_with("welcome_back", Language::English, &[("name", "Sara")]);
        assert!(text.contains("Welcome back, Sara!"));
        assert!(!text.contains("{name}"));
    }

    #[test]
    fn test_missing_key() {
        assert_eq!(t("no_such_key", Language::Farsi), "MISSING_KEY: no_such_key");
    }

    #[test]
    fn test_farsi_catalog_covers_english() {
        for (key, _) in en::ENTRIES {
            assert!(fa::get(key).is_some(), "fa is missing {key}");
            assert!(en::get(key).is_some(), "en is missing {key}");
        }
    }
}

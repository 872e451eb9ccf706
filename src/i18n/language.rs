//! Language type: validated language representation.

use crate::i18n::LanguageRegistry;
use anyhow::{bail, Result};

/// A validated language.
///
/// Only supported, enabled languages can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "sq", "en")
    code: &'static str,
}

impl Language {
    pub const ALBANIAN: Language = Language { code: "sq" };

    pub const ENGLISH: Language = Language { code: "en" };

    /// Only enabled languages from the registry are accepted.
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Get the canonical (source) language.
    ///
    /// Canonical category names are stored in this language and it is the
    /// default for visitors without a saved preference.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_albanian_constant() {
        let albanian = Language::ALBANIAN;
        assert_eq!(albanian.code(), "sq");
        assert_eq!(albanian, Language::canonical());
    }

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_ne!(english, Language::canonical());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_valid() {
        assert_eq!(Language::from_code("sq").unwrap(), Language::ALBANIAN);
        assert_eq!(Language::from_code("en").unwrap(), Language::ENGLISH);
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert!(Language::from_code("EN").is_err());
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    // ==================== Default Tests ====================

    #[test]
    fn test_default_is_canonical_albanian() {
        assert_eq!(Language::default(), Language::ALBANIAN);
        assert_eq!(Language::canonical(), Language::ALBANIAN);
    }

}

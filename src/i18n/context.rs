//! Per-visitor language context and its persistence.
//!
//! The context is built once per request from a [`PreferenceStore`] and passed
//! down to everything that renders text.

use crate::i18n::{strings, Language};
use std::collections::HashMap;
use tracing::debug;

/// Key under which the selected display language is persisted.
pub const LANGUAGE_KEY: &str = "delfina_lang";

/// Key-value store for visitor preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process preference store.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// The display language selected for one visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageContext {
    language: Language,
}

impl LanguageContext {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Restore the saved language, falling back to the canonical language
    /// when nothing (or something unsupported) is stored.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let language = match store.get(LANGUAGE_KEY) {
            Some(code) => Language::from_code(&code).unwrap_or_else(|e| {
                debug!("Ignoring saved language preference: {}", e);
                Language::canonical()
            }),
            None => Language::canonical(),
        };
        Self { language }
    }

    /// Switch language and persist the choice.
    pub fn set_language(&mut self, language: Language, store: &mut dyn PreferenceStore) {
        self.language = language;
        store.set(LANGUAGE_KEY, language.code());
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn code(&self) -> &'static str {
        self.language.code()
    }

    /// Translate a UI string key; unknown keys render as the key.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        strings::translate(key, self.language)
    }

    /// Label for a canonical category name.
    pub fn category(&self, canonical: &str) -> String {
        let key = format!("category.{}", canonical);
        match strings::translate(&key, self.language) {
            translated if translated == key => canonical.to_string(),
            translated => translated.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Load Tests ====================

    #[test]
    fn test_load_defaults_to_albanian() {
        let store = MemoryPreferenceStore::default();
        let ctx = LanguageContext::load(&store);
        assert_eq!(ctx.language(), Language::ALBANIAN);
    }

    #[test]
    fn test_load_saved_english() {
        let mut store = MemoryPreferenceStore::default();
        store.set(LANGUAGE_KEY, "en");

        let ctx = LanguageContext::load(&store);
        assert_eq!(ctx.language(), Language::ENGLISH);
    }

    #[test]
    fn test_load_ignores_unsupported_code() {
        let mut store = MemoryPreferenceStore::default();
        store.set(LANGUAGE_KEY, "de");

        let ctx = LanguageContext::load(&store);
        assert_eq!(ctx.language(), Language::ALBANIAN);
    }

    // ==================== set_language Tests ====================

    #[test]
    fn test_set_language_persists() {
        let mut store = MemoryPreferenceStore::default();
        let mut ctx = LanguageContext::load(&store);

        ctx.set_language(Language::ENGLISH, &mut store);

        assert_eq!(ctx.code(), "en");
        assert_eq!(store.get(LANGUAGE_KEY), Some("en".to_string()));
        assert_eq!(LanguageContext::load(&store), ctx);
    }

    // ==================== Translation Tests ====================

    #[test]
    fn test_t_follows_language() {
        let sq = LanguageContext::new(Language::ALBANIAN);
        let en = LanguageContext::new(Language::ENGLISH);

        assert_eq!(sq.t("contact.send"), "Dërgo Mesazhin");
        assert_eq!(en.t("contact.send"), "Send Message");
    }

    #[test]
    fn test_category_label() {
        let en = LanguageContext::new(Language::ENGLISH);
        assert_eq!(en.category("Kuzhinat"), "Kitchens");
    }

    #[test]
    fn test_unknown_category_renders_as_is() {
        let en = LanguageContext::new(Language::ENGLISH);
        assert_eq!(en.category("Outdoor"), "Outdoor");
    }
}

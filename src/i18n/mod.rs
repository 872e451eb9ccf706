//! Internationalization (i18n) for the bilingual storefront.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages
//! - `language`: Validated `Language` type
//! - `strings`: UI string table with key fallback
//! - `context`: Per-visitor `LanguageContext` persisted through a `PreferenceStore`
//!
//! # Example
//!
//! ```rust,ignore
//! use delfina_home::i18n::{LanguageContext, MemoryPreferenceStore, Language};
//!
//! let mut store = MemoryPreferenceStore::default();
//! let mut ctx = LanguageContext::load(&store);
//! ctx.set_language(Language::ENGLISH, &mut store);
//! assert_eq!(ctx.t("nav.home"), "Home");
//! ```

mod context;
mod language;
mod registry;
mod strings;

pub use context::{LanguageContext, MemoryPreferenceStore, PreferenceStore, LANGUAGE_KEY};
pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{translate, UiString, UI_STRINGS};

//! Catalog domain types.

use crate::i18n::Language;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Price text shown as a localized "On Request" label.
pub const PRICE_ON_REQUEST: &str = "On Request";

/// A text field carried in every supported language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    pub sq: String,
    pub en: String,
}

impl LocalizedString {
    pub fn new(sq: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            sq: sq.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language.code() {
            "sq" => &self.sq,
            _ => &self.en,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.sq.trim().is_empty() && self.en.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpecifications {
    pub dimensions: LocalizedString,
    pub materials: LocalizedString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: LocalizedString,
    pub description: LocalizedString,
    pub specifications: ProductSpecifications,
    pub price: String,
    /// Canonical (Albanian) category name, see [`Category`].
    pub category: String,
    /// Image URIs or data URIs; index 0 is the cover image.
    pub images: Vec<String>,
    pub is_featured: bool,
    pub is_visible: bool,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl Product {
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn price_on_request(&self) -> bool {
        self.price.trim().eq_ignore_ascii_case(PRICE_ON_REQUEST)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Epoch milliseconds.
    pub date: i64,
    pub read: bool,
}

/// Visitor input for a contact submission; id, date and read flag are
/// assigned on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    LivingRoom,
    Kitchens,
    Bedrooms,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::LivingRoom, Category::Kitchens, Category::Bedrooms];

    /// Name as stored in the `category` column.
    pub fn canonical(&self) -> &'static str {
        match self {
            Category::LivingRoom => "Dhoma e Ditës",
            Category::Kitchens => "Kuzhinat",
            Category::Bedrooms => "Dhomat e Gjumit",
        }
    }

    pub fn from_canonical(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.canonical() == name)
    }
}

fn uuid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("UUID pattern is valid")
    })
}

/// Whether `id` has the 8-4-4-4-12 hex shape required for product ids.
pub fn is_valid_product_id(id: &str) -> bool {
    uuid_pattern().is_match(id)
}

/// Fresh identifier for a new product.
pub fn new_product_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

//! Askama templates and the view models they render.
//!
//! Templates only print prepared values; language selection happens here.

use crate::admin::{Dashboard, Tab};
use crate::catalog::ALL_CATEGORIES;
use crate::config::SiteConfig;
use crate::i18n::{LanguageContext, LanguageRegistry};
use crate::models::{ContactSubmission, NewContactSubmission, Product};
use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::{DateTime, Utc};
use tracing::error;

/// Render a template, or a plain 500 if rendering fails.
pub fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// `wa.me` link for a phone number; keeps only its digits.
pub fn whatsapp_link(number: &str) -> Option<String> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("https://wa.me/{}", digits))
    }
}

/// Price text for the admin list; `On Request` uses the localized label.
fn price_label(product: &Product, i18n: &LanguageContext) -> String {
    if product.price_on_request() {
        i18n.t("products.on_request").to_string()
    } else {
        product.price.clone()
    }
}

fn format_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default()
}

// ==================== Shared Layout ====================

pub struct LanguageLink {
    pub code: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Header and footer data shared by every page.
pub struct Layout {
    pub i18n: LanguageContext,
    pub lang: &'static str,
    pub languages: Vec<LanguageLink>,
    pub site_name: String,
    pub address: String,
    pub hours: String,
    pub phone: String,
    pub email: String,
    pub instagram: String,
    pub facebook: String,
    pub pinterest: Option<String>,
    pub linkedin: Option<String>,
}

impl Layout {
    pub fn new(i18n: LanguageContext, site: &SiteConfig) -> Self {
        let language = i18n.language();
        Self {
            i18n,
            lang: i18n.code(),
            languages: LanguageRegistry::get()
                .list_enabled()
                .into_iter()
                .map(|config| LanguageLink {
                    code: config.code,
                    label: config.native_name,
                    active: config.code == i18n.code(),
                })
                .collect(),
            site_name: site.name.clone(),
            address: site.contact.address.get(language).to_string(),
            hours: site.contact.hours.get(language).to_string(),
            phone: site.contact.phone.clone(),
            email: site.contact.email.clone(),
            instagram: site.social.instagram.clone(),
            facebook: site.social.facebook.clone(),
            pinterest: site.social.pinterest.clone(),
            linkedin: site.social.linkedin.clone(),
        }
    }
}

// ==================== Product Views ====================

pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub cover: Option<String>,
}

impl ProductCard {
    pub fn new(product: &Product, i18n: &LanguageContext) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.get(i18n.language()).to_string(),
            category: i18n.category(&product.category),
            cover: product.cover_image().map(String::from),
        }
    }
}

pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl CategoryOption {
    pub fn new(value: &str, selected: &str, i18n: &LanguageContext) -> Self {
        let label = if value == ALL_CATEGORIES {
            i18n.t("products.filter.all").to_string()
        } else {
            i18n.category(value)
        };
        Self {
            value: value.to_string(),
            label,
            selected: value == selected,
        }
    }
}

pub struct ProductView {
    pub title: String,
    pub description: String,
    pub category: String,
    pub dimensions: String,
    pub materials: String,
    pub images: Vec<String>,
}

impl ProductView {
    pub fn new(product: &Product, i18n: &LanguageContext) -> Self {
        let language = i18n.language();
        Self {
            title: product.title.get(language).to_string(),
            description: product.description.get(language).to_string(),
            category: i18n.category(&product.category),
            dimensions: product.specifications.dimensions.get(language).to_string(),
            materials: product.specifications.materials.get(language).to_string(),
            images: product.images.clone(),
        }
    }
}

// ==================== Public Pages ====================

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub hero_image: String,
    pub featured: Vec<ProductCard>,
}

#[derive(Template)]
#[template(path = "collection.html")]
pub struct CollectionTemplate {
    pub layout: Layout,
    pub categories: Vec<CategoryOption>,
    pub products: Vec<ProductCard>,
}

#[derive(Template)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub layout: Layout,
    pub product: ProductView,
    pub inquire_link: String,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
    pub header_image: String,
    pub main_image: String,
    pub detail_image: String,
    pub craft_image: String,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub form: NewContactSubmission,
    pub sent: bool,
    pub failed: bool,
    pub whatsapp: Option<String>,
}

// ==================== Admin Pages ====================

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub email: String,
    pub error: Option<String>,
}

pub struct ProductRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: String,
    pub cover: Option<String>,
    pub is_visible: bool,
    pub is_featured: bool,
}

pub struct MessageRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: String,
    pub read: bool,
}

impl From<&ContactSubmission> for MessageRow {
    fn from(m: &ContactSubmission) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            email: m.email.clone(),
            message: m.message.clone(),
            date: format_date(m.date),
            read: m.read,
        }
    }
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub products_tab: bool,
    pub products: Vec<ProductRow>,
    pub messages: Vec<MessageRow>,
    pub unread: usize,
    pub notice: Option<String>,
}

impl DashboardTemplate {
    pub fn new(layout: Layout, dashboard: &Dashboard, notice: Option<String>) -> Self {
        let i18n = layout.i18n;
        let products = dashboard
            .products()
            .iter()
            .map(|p| ProductRow {
                id: p.id.clone(),
                title: p.title.get(i18n.language()).to_string(),
                category: i18n.category(&p.category),
                price: price_label(p, &i18n),
                cover: p.cover_image().map(String::from),
                is_visible: p.is_visible,
                is_featured: p.is_featured,
            })
            .collect();
        Self {
            layout,
            products_tab: dashboard.tab == Tab::Products,
            products,
            messages: dashboard.messages().iter().map(MessageRow::from).collect(),
            unread: dashboard.unread_count(),
            notice,
        }
    }
}

pub struct ImageTile {
    pub index: usize,
    pub src: String,
    pub is_cover: bool,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

#[derive(Template)]
#[template(path = "admin/edit.html")]
pub struct EditTemplate {
    pub layout: Layout,
    pub is_new: bool,
    pub title_sq: String,
    pub title_en: String,
    pub description_sq: String,
    pub description_en: String,
    pub dimensions_sq: String,
    pub dimensions_en: String,
    pub materials_sq: String,
    pub materials_en: String,
    pub price: String,
    pub categories: Vec<CategoryOption>,
    pub images: Vec<ImageTile>,
    pub is_featured: bool,
    pub is_visible: bool,
    pub error: Option<String>,
}

impl EditTemplate {
    pub fn new(
        layout: Layout,
        dashboard: &Dashboard,
        session: &crate::editor::EditSession,
        error: Option<String>,
    ) -> Self {
        let i18n = layout.i18n;
        let draft = &session.draft;
        let title = draft.title.clone().unwrap_or_default();
        let description = draft.description.clone().unwrap_or_default();
        let specifications = draft.specifications.clone().unwrap_or_default();
        let category = draft.category.clone().unwrap_or_default();

        let mut categories: Vec<CategoryOption> = crate::models::Category::ALL
            .iter()
            .map(|c| CategoryOption::new(c.canonical(), &category, &i18n))
            .collect();
        if !category.is_empty() && crate::models::Category::from_canonical(&category).is_none() {
            categories.push(CategoryOption::new(&category, &category, &i18n));
        }

        let count = draft.images.len();
        let images = draft
            .images
            .iter()
            .enumerate()
            .map(|(index, src)| ImageTile {
                index,
                src: src.clone(),
                is_cover: index == 0,
                prev: index.checked_sub(1),
                next: (index + 1 < count).then_some(index + 1),
            })
            .collect();

        Self {
            layout,
            is_new: dashboard.is_new_draft(),
            title_sq: title.sq,
            title_en: title.en,
            description_sq: description.sq,
            description_en: description.en,
            dimensions_sq: specifications.dimensions.sq,
            dimensions_en: specifications.dimensions.en,
            materials_sq: specifications.materials.sq,
            materials_en: specifications.materials.en,
            price: draft.price.clone().unwrap_or_default(),
            categories,
            images,
            is_featured: draft.is_featured.unwrap_or(false),
            is_visible: draft.is_visible.unwrap_or(true),
            error,
        }
    }
}

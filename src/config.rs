use crate::models::LocalizedString;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Supabase
    pub supabase_url: String,
    pub supabase_anon_key: String,

    // Storefront content
    pub site: SiteConfig,

    // Admin
    /// Reject product drafts without images on save.
    pub require_product_images: bool,

    // Server
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub name: String,
    pub contact: ContactDetails,
    pub social: SocialLinks,
    pub imagery: Imagery,
}

#[derive(Debug, Clone)]
pub struct ContactDetails {
    pub address: LocalizedString,
    pub phone: String,
    pub email: String,
    pub hours: LocalizedString,
    pub whatsapp: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SocialLinks {
    pub instagram: String,
    pub facebook: String,
    pub pinterest: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Imagery {
    pub hero: String,
    pub about_header: String,
    pub about_main: String,
    pub about_detail: String,
    pub about_craft: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Delfina Home".to_string(),
            contact: ContactDetails {
                address: LocalizedString::new(
                    "Rruga Delfina, 119, Malishevë 24000, Kosovë",
                    "Rruga Delfina, 119, Malisheva 24000, Kosovo",
                ),
                phone: "+383 49 664 999".to_string(),
                email: "info@delfinahome.com".to_string(),
                hours: LocalizedString::new(
                    "E Hënë - E Shtunë: 07:00 - 18:00",
                    "Mon-Sat: 07:00 - 18:00",
                ),
                whatsapp: Some("+383 49 664 999".to_string()),
            },
            social: SocialLinks {
                instagram: "https://www.instagram.com/delfina_home/".to_string(),
                facebook: "https://www.facebook.com/MobileriaDelfina/".to_string(),
                pinterest: None,
                linkedin: None,
            },
            imagery: Imagery {
                hero: "/static/images/hero.jpg".to_string(),
                about_header: "/static/images/about-header.jpg".to_string(),
                about_main: "/static/images/about-main.jpg".to_string(),
                about_detail: "/static/images/about-detail.jpg".to_string(),
                about_craft: "/static/images/about-craft.jpg".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = SiteConfig::default();

        Ok(Self {
            // Supabase
            supabase_url: std::env::var("SUPABASE_URL")
                .context("SUPABASE_URL not set")?
                .trim_end_matches('/')
                .to_string(),
            supabase_anon_key: std::env::var("SUPABASE_ANON_KEY")
                .context("SUPABASE_ANON_KEY not set")?,

            // Storefront content
            site: SiteConfig {
                name: env_or("SITE_NAME", defaults.name),
                contact: ContactDetails {
                    address: LocalizedString::new(
                        env_or("CONTACT_ADDRESS_SQ", defaults.contact.address.sq),
                        env_or("CONTACT_ADDRESS_EN", defaults.contact.address.en),
                    ),
                    phone: env_or("CONTACT_PHONE", defaults.contact.phone),
                    email: env_or("CONTACT_EMAIL", defaults.contact.email),
                    hours: LocalizedString::new(
                        env_or("CONTACT_HOURS_SQ", defaults.contact.hours.sq),
                        env_or("CONTACT_HOURS_EN", defaults.contact.hours.en),
                    ),
                    whatsapp: env_opt("WHATSAPP_NUMBER").or(defaults.contact.whatsapp),
                },
                social: SocialLinks {
                    instagram: env_or("INSTAGRAM_URL", defaults.social.instagram),
                    facebook: env_or("FACEBOOK_URL", defaults.social.facebook),
                    pinterest: env_opt("PINTEREST_URL"),
                    linkedin: env_opt("LINKEDIN_URL"),
                },
                imagery: Imagery {
                    hero: env_or("HERO_IMAGE", defaults.imagery.hero),
                    about_header: env_or("ABOUT_HEADER_IMAGE", defaults.imagery.about_header),
                    about_main: env_or("ABOUT_MAIN_IMAGE", defaults.imagery.about_main),
                    about_detail: env_or("ABOUT_DETAIL_IMAGE", defaults.imagery.about_detail),
                    about_craft: env_or("ABOUT_CRAFT_IMAGE", defaults.imagery.about_craft),
                },
            },

            // Admin
            require_product_images: std::env::var("REQUIRE_PRODUCT_IMAGES")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

/// Non-empty environment value, if any.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: String) -> String {
    env_opt(key).unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

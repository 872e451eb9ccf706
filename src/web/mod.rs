//! HTTP surface: public storefront and admin panel.

mod admin;
mod pages;
pub mod views;

use crate::admin::Dashboard;
use crate::auth::{AuthClient, AuthEvent, AuthSubscription};
use crate::config::Config;
use crate::gateway::SupabaseGateway;
use crate::i18n::{LanguageContext, PreferenceStore};
use crate::security::AdminGate;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Cookie carrying the admin session token.
pub const ADMIN_COOKIE: &str = "delfina_admin";

/// Uploads are embedded as data URIs, so allow a few large photos per request.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub struct AppState {
    pub config: Config,
    pub gateway: SupabaseGateway,
    pub auth: AuthClient,
    pub gate: Arc<AdminGate>,
    pub dashboard: Mutex<Dashboard>,
    _auth_listener: AuthSubscription,
}

impl AppState {
    /// Build the shared state. Must run inside a tokio runtime.
    pub fn new(config: Config) -> Arc<Self> {
        let gateway = SupabaseGateway::from_config(&config);
        let auth = AuthClient::from_config(&config);
        let gate = Arc::new(AdminGate::new());

        let listener_gate = Arc::clone(&gate);
        let listener = auth.on_auth_state_change(move |event| {
            if event == AuthEvent::SignedOut {
                info!("Admin session closed");
                listener_gate.revoke();
            }
        });

        Arc::new(Self {
            config,
            gateway,
            auth,
            gate,
            dashboard: Mutex::new(Dashboard::new()),
            _auth_listener: listener,
        })
    }

    /// Gateway acting as the signed-in admin, if the request carries the
    /// current admin cookie and the session is still valid.
    pub async fn admin_gateway(&self, jar: &CookieJar) -> Option<SupabaseGateway> {
        let token = jar.get(ADMIN_COOKIE)?;
        if !self.gate.verify(token.value()) {
            return None;
        }
        let session = self.auth.active_session().await?;
        Some(self.gateway.with_access_token(&session.access_token))
    }
}

/// Visitor preferences kept in cookies.
#[derive(Debug, Default, Clone)]
pub struct CookiePreferences {
    jar: CookieJar,
}

impl CookiePreferences {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl PreferenceStore for CookiePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(|c| c.value().to_string())
    }

    fn set(&mut self, key: &str, value: &str) {
        let cookie = Cookie::build((key.to_string(), value.to_string()))
            .path("/")
            .same_site(SameSite::Lax)
            .permanent();
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }
}

pub fn language_context(jar: &CookieJar) -> LanguageContext {
    LanguageContext::load(&CookiePreferences::new(jar.clone()))
}

pub fn router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/", get(pages::home))
        .route("/collection", get(pages::collection))
        .route("/product/:id", get(pages::product_detail))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact_page).post(pages::contact_submit))
        .route("/lang/:code", get(pages::set_language))
        .route("/health", get(|| async { "OK" }));

    let admin = Router::new()
        .route("/", get(admin::dashboard))
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/products/new", post(admin::new_product))
        .route("/products/:id/edit", post(admin::edit_product))
        .route("/products/:id/delete", post(admin::delete_product))
        .route("/messages/:id/read", post(admin::mark_read))
        .route("/edit", get(admin::edit_page))
        .route("/edit/images", post(admin::upload_images))
        .route("/edit/images/:index/remove", post(admin::remove_image))
        .route("/edit/images/reorder", post(admin::reorder_images))
        .route("/edit/save", post(admin::save))
        .route("/edit/cancel", post(admin::cancel))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .merge(public)
        .nest("/admin", admin)
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, LANGUAGE_KEY};

    #[test]
    fn test_cookie_preferences_round_trip() {
        let mut prefs = CookiePreferences::default();
        assert_eq!(prefs.get(LANGUAGE_KEY), None);

        prefs.set(LANGUAGE_KEY, "en");

        let jar = prefs.into_jar();
        let cookie = jar.get(LANGUAGE_KEY).unwrap();
        assert_eq!(cookie.value(), "en");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(language_context(&jar).language(), Language::ENGLISH);
    }

    #[test]
    fn test_language_context_defaults_without_cookie() {
        let jar = CookieJar::new();
        assert_eq!(language_context(&jar).language(), Language::ALBANIAN);
    }
}

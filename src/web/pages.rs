use super::views::{
    render, whatsapp_link, AboutTemplate, CategoryOption, CollectionTemplate, ContactTemplate,
    HomeTemplate, Layout, ProductCard, ProductTemplate, ProductView,
};
use super::{language_context, AppState, CookiePreferences};
use crate::catalog::{self, ALL_CATEGORIES};
use crate::i18n::{Language, LanguageContext};
use crate::models::NewContactSubmission;
use axum::extract::{Form, Path, Query, State};
use axum::http::{header, HeaderMap, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

pub async fn home(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let i18n = language_context(&jar);
    let products = state.gateway.list_products().await;
    let featured = catalog::featured(&products)
        .into_iter()
        .map(|p| ProductCard::new(p, &i18n))
        .collect();

    render(&HomeTemplate {
        layout: Layout::new(i18n, &state.config.site),
        hero_image: state.config.site.imagery.hero.clone(),
        featured,
    })
}

#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    category: Option<String>,
}

pub async fn collection(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<CollectionQuery>,
) -> Response {
    let i18n = language_context(&jar);
    let selected = query
        .category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());

    let products = state.gateway.list_products().await;
    let categories = catalog::category_options(&products)
        .iter()
        .map(|c| CategoryOption::new(c, &selected, &i18n))
        .collect();
    let cards = catalog::filter_by_category(&products, &selected)
        .into_iter()
        .map(|p| ProductCard::new(p, &i18n))
        .collect();

    render(&CollectionTemplate {
        layout: Layout::new(i18n, &state.config.site),
        categories,
        products: cards,
    })
}

pub async fn product_detail(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let Some(product) = state.gateway.get_product(&id).await else {
        debug!("Product {} not found, redirecting to collection", id);
        return Redirect::to("/collection").into_response();
    };

    let i18n = language_context(&jar);
    let inquire_link = state
        .config
        .site
        .contact
        .whatsapp
        .as_deref()
        .and_then(whatsapp_link)
        .unwrap_or_else(|| "/contact".to_string());

    render(&ProductTemplate {
        product: ProductView::new(&product, &i18n),
        layout: Layout::new(i18n, &state.config.site),
        inquire_link,
    })
}

pub async fn about(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let imagery = &state.config.site.imagery;
    render(&AboutTemplate {
        layout: Layout::new(language_context(&jar), &state.config.site),
        header_image: imagery.about_header.clone(),
        main_image: imagery.about_main.clone(),
        detail_image: imagery.about_detail.clone(),
        craft_image: imagery.about_craft.clone(),
    })
}

fn contact_template(
    state: &AppState,
    i18n: LanguageContext,
    form: NewContactSubmission,
    sent: bool,
    failed: bool,
) -> ContactTemplate {
    ContactTemplate {
        layout: Layout::new(i18n, &state.config.site),
        form,
        sent,
        failed,
        whatsapp: state.config.site.contact.whatsapp.as_deref().and_then(whatsapp_link),
    }
}

pub async fn contact_page(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let template = contact_template(
        &state,
        language_context(&jar),
        NewContactSubmission::default(),
        false,
        false,
    );
    render(&template)
}

/// A successful send clears the form; a failed one keeps what was typed.
pub async fn contact_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<NewContactSubmission>,
) -> Response {
    let i18n = language_context(&jar);

    let template = if state.gateway.save_message(&form).await {
        info!("Contact message received from {}", form.email);
        contact_template(&state, i18n, NewContactSubmission::default(), true, false)
    } else {
        contact_template(&state, i18n, form, false, true)
    };
    render(&template)
}

/// Path (and query) of the referring page on this site, or `/`.
fn back_target(headers: &HeaderMap) -> String {
    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Uri>().ok())
        .and_then(|uri| uri.path_and_query().map(|pq| pq.as_str().to_string()))
        .filter(|target| target.starts_with('/') && !target.starts_with("//"))
        .unwrap_or_else(|| "/".to_string())
}

pub async fn set_language(
    Path(code): Path<String>,
    headers: HeaderMap,
    jar: CookieJar,
) -> impl IntoResponse {
    let mut prefs = CookiePreferences::new(jar);
    match Language::from_code(&code) {
        Ok(language) => {
            let mut i18n = LanguageContext::load(&prefs);
            i18n.set_language(language, &mut prefs);
        }
        Err(e) => debug!("Ignoring language switch: {}", e),
    }
    (prefs.into_jar(), Redirect::to(&back_target(&headers)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn referer(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_back_target_uses_referer_path() {
        assert_eq!(
            back_target(&referer("http://localhost:8080/collection?category=Kuzhinat")),
            "/collection?category=Kuzhinat"
        );
    }

    #[test]
    fn test_back_target_defaults_to_home() {
        assert_eq!(back_target(&HeaderMap::new()), "/");
        assert_eq!(back_target(&referer("not a uri")), "/");
        assert_eq!(back_target(&referer("http://localhost:8080")), "/");
    }
}

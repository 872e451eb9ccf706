use super::views::{render, DashboardTemplate, EditTemplate, Layout, LoginTemplate};
use super::{language_context, AppState, ADMIN_COOKIE};
use crate::admin::Tab;
use crate::editor::{CommitRules, EditSession, ImageUpload, ProductDraft};
use crate::gateway::SupabaseGateway;
use crate::models::{LocalizedString, ProductSpecifications};
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::{Form, Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

async fn require_admin(state: &AppState, jar: &CookieJar) -> Result<SupabaseGateway, Response> {
    state
        .admin_gateway(jar)
        .await
        .ok_or_else(|| Redirect::to("/admin").into_response())
}

fn commit_rules(state: &AppState) -> CommitRules {
    CommitRules {
        require_images: state.config.require_product_images,
    }
}

// ==================== Session ====================

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    tab: Option<String>,
    notice: Option<String>,
}

/// Login form without a session, dashboard with one.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let i18n = language_context(&jar);
    let layout = Layout::new(i18n, &state.config.site);

    let Some(gateway) = state.admin_gateway(&jar).await else {
        return render(&LoginTemplate {
            layout,
            email: String::new(),
            error: None,
        });
    };

    let notice = match query.notice.as_deref() {
        Some("delete_failed") => Some(i18n.t("admin.delete_failed").to_string()),
        _ => None,
    };

    let mut dashboard = state.dashboard.lock().await;
    dashboard.tab = Tab::from_query(query.tab.as_deref());
    dashboard.refresh(&gateway).await;
    render(&DashboardTemplate::new(layout, &dashboard, notice))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth.sign_in_with_password(&form.email, &form.password).await {
        Ok(_) => {
            let cookie = Cookie::build((ADMIN_COOKIE, state.gate.issue()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict);
            (jar.add(cookie), Redirect::to("/admin")).into_response()
        }
        Err(e) => {
            let layout = Layout::new(language_context(&jar), &state.config.site);
            render(&LoginTemplate {
                layout,
                email: form.email.trim().to_string(),
                error: Some(e.user_message().to_string()),
            })
        }
    }
}

pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if state.admin_gateway(&jar).await.is_some() {
        state.auth.sign_out().await;
        state.gate.revoke();
        state.dashboard.lock().await.cancel_edit();
    }
    let jar = jar.remove(Cookie::build(ADMIN_COOKIE).path("/"));
    (jar, Redirect::to("/admin")).into_response()
}

// ==================== Products & Messages ====================

pub async fn new_product(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Err(redirect) = require_admin(&state, &jar).await {
        return redirect;
    }
    state.dashboard.lock().await.start_new();
    Redirect::to("/admin/edit").into_response()
}

pub async fn edit_product(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let gateway = match require_admin(&state, &jar).await {
        Ok(gateway) => gateway,
        Err(redirect) => return redirect,
    };

    let mut dashboard = state.dashboard.lock().await;
    if !dashboard.start_edit(&id) {
        dashboard.refresh(&gateway).await;
        if !dashboard.start_edit(&id) {
            warn!("Cannot edit unknown product {}", id);
            return Redirect::to("/admin").into_response();
        }
    }
    Redirect::to("/admin/edit").into_response()
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let gateway = match require_admin(&state, &jar).await {
        Ok(gateway) => gateway,
        Err(redirect) => return redirect,
    };

    if state.dashboard.lock().await.delete(&gateway, &id).await {
        Redirect::to("/admin").into_response()
    } else {
        Redirect::to("/admin?notice=delete_failed").into_response()
    }
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let gateway = match require_admin(&state, &jar).await {
        Ok(gateway) => gateway,
        Err(redirect) => return redirect,
    };

    state.dashboard.lock().await.mark_read(&gateway, &id).await;
    Redirect::to("/admin?tab=messages").into_response()
}

// ==================== Editor ====================

/// Everything posted by the edit form: text fields plus any image files.
#[derive(Debug, Default)]
struct EditForm {
    fields: HashMap<String, String>,
    uploads: Vec<ImageUpload>,
}

impl EditForm {
    async fn read(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = EditForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(String::from) {
                Some(file_name) => {
                    let content_type = field.content_type().map(String::from);
                    let bytes = field.bytes().await?;
                    // Browsers send an empty part when no file was picked.
                    if !bytes.is_empty() {
                        form.uploads.push(ImageUpload {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }
        Ok(form)
    }

    fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    fn localized(&self, name: &str) -> LocalizedString {
        LocalizedString::new(
            self.text(&format!("{}_sq", name)),
            self.text(&format!("{}_en", name)),
        )
    }

    /// Copy the posted fields into the draft. Posts without the text fields
    /// leave the draft alone.
    fn apply(&self, draft: &mut ProductDraft) {
        if !self.fields.contains_key("title_sq") {
            return;
        }
        draft.title = Some(self.localized("title"));
        draft.description = Some(self.localized("description"));
        draft.specifications = Some(ProductSpecifications {
            dimensions: self.localized("dimensions"),
            materials: self.localized("materials"),
        });
        draft.price = Some(self.text("price"));
        if let Some(category) = self.fields.get("category") {
            draft.category = Some(category.clone());
        }
        draft.is_featured = Some(self.fields.contains_key("is_featured"));
        draft.is_visible = Some(self.fields.contains_key("is_visible"));
    }

    /// Apply the posted fields and append any attached files. Every button of
    /// the edit form posts the file input, so each action takes its files.
    async fn merge_into(&mut self, session: &mut EditSession) {
        self.apply(&mut session.draft);
        let uploads = std::mem::take(&mut self.uploads);
        if !uploads.is_empty() {
            let added = session.add_images(uploads).await;
            info!("Added {} images to draft", added);
        }
    }

    /// `from`/`to` indices, posted either as two fields or as `move=from:to`.
    fn move_indices(&self) -> Option<(usize, usize)> {
        if let Some((from, to)) = self.fields.get("move").and_then(|m| m.split_once(':')) {
            return Some((from.trim().parse().ok()?, to.trim().parse().ok()?));
        }
        let from = self.fields.get("from")?.trim().parse().ok()?;
        let to = self.fields.get("to")?.trim().parse().ok()?;
        Some((from, to))
    }
}

async fn read_form(multipart: Multipart) -> EditForm {
    EditForm::read(multipart).await.unwrap_or_else(|e| {
        warn!("Could not read edit form: {}", e);
        EditForm::default()
    })
}

pub async fn edit_page(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Err(redirect) = require_admin(&state, &jar).await {
        return redirect;
    }

    let dashboard = state.dashboard.lock().await;
    let Some(session) = dashboard.editing() else {
        return Redirect::to("/admin").into_response();
    };
    let layout = Layout::new(language_context(&jar), &state.config.site);
    render(&EditTemplate::new(layout, &dashboard, session, None))
}

pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    multipart: Multipart,
) -> Response {
    if let Err(redirect) = require_admin(&state, &jar).await {
        return redirect;
    }
    let mut form = read_form(multipart).await;

    let mut dashboard = state.dashboard.lock().await;
    if let Some(session) = dashboard.editing_mut() {
        form.merge_into(session).await;
    }
    Redirect::to("/admin/edit").into_response()
}

pub async fn remove_image(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(index): Path<usize>,
    multipart: Multipart,
) -> Response {
    if let Err(redirect) = require_admin(&state, &jar).await {
        return redirect;
    }
    let mut form = read_form(multipart).await;

    let mut dashboard = state.dashboard.lock().await;
    if let Some(session) = dashboard.editing_mut() {
        form.merge_into(session).await;
        session.remove_image(index);
    }
    Redirect::to("/admin/edit").into_response()
}

pub async fn reorder_images(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    multipart: Multipart,
) -> Response {
    if let Err(redirect) = require_admin(&state, &jar).await {
        return redirect;
    }
    let mut form = read_form(multipart).await;

    let mut dashboard = state.dashboard.lock().await;
    if let Some(session) = dashboard.editing_mut() {
        form.merge_into(session).await;
        match form.move_indices() {
            Some((from, to)) => {
                session.begin_drag(from);
                session.drag_over(to);
                session.drop_on(to);
            }
            None => session.end_drag(),
        }
    }
    Redirect::to("/admin/edit").into_response()
}

/// A second submit after a successful save finds no open draft and is
/// sent back to the dashboard.
pub async fn save(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    multipart: Multipart,
) -> Response {
    let gateway = match require_admin(&state, &jar).await {
        Ok(gateway) => gateway,
        Err(redirect) => return redirect,
    };
    let mut form = read_form(multipart).await;

    let mut dashboard = state.dashboard.lock().await;
    match dashboard.editing_mut() {
        Some(session) => form.merge_into(session).await,
        None => return Redirect::to("/admin").into_response(),
    }

    match dashboard.save(&gateway, commit_rules(&state)).await {
        Ok(()) => Redirect::to("/admin").into_response(),
        Err(e) => {
            warn!("Product not saved: {}", e);
            let i18n = language_context(&jar);
            let message = i18n.t(e.message_key()).to_string();
            let Some(session) = dashboard.editing() else {
                return Redirect::to("/admin").into_response();
            };
            let layout = Layout::new(i18n, &state.config.site);
            render(&EditTemplate::new(layout, &dashboard, session, Some(message)))
        }
    }
}

pub async fn cancel(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Err(redirect) = require_admin(&state, &jar).await {
        return redirect;
    }
    state.dashboard.lock().await.cancel_edit();
    Redirect::to("/admin").into_response()
}

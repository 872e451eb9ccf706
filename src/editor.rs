//! Product editing: the draft being edited, its image list and commit.

use crate::gateway::SupabaseGateway;
use crate::models::{
    new_product_id, Category, LocalizedString, Product, ProductSpecifications, PRICE_ON_REQUEST,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, error};

/// A product under edit. Every field may still be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub id: Option<String>,
    pub title: Option<LocalizedString>,
    pub description: Option<LocalizedString>,
    pub specifications: Option<ProductSpecifications>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub is_featured: Option<bool>,
    pub is_visible: Option<bool>,
    pub created_at: Option<i64>,
}

impl ProductDraft {
    /// A blank draft for a product that does not exist yet.
    pub fn new_product() -> Self {
        Self {
            id: Some(new_product_id()),
            title: Some(LocalizedString::default()),
            description: Some(LocalizedString::default()),
            specifications: Some(ProductSpecifications::default()),
            price: Some(PRICE_ON_REQUEST.to_string()),
            category: Some(Category::default().canonical().to_string()),
            images: Vec::new(),
            is_featured: Some(false),
            is_visible: Some(true),
            created_at: Some(chrono::Utc::now().timestamp_millis()),
        }
    }

    fn has_title(&self) -> bool {
        self.title.as_ref().is_some_and(|t| !t.is_blank())
    }

    /// Complete the draft into a product, checking required fields.
    pub fn to_product(&self, rules: CommitRules) -> Result<Product, CommitError> {
        let id = match self.id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => return Err(CommitError::MissingFields),
        };
        if !self.has_title() {
            return Err(CommitError::MissingFields);
        }
        if rules.require_images && self.images.is_empty() {
            return Err(CommitError::NoImages);
        }

        Ok(Product {
            id,
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            specifications: self.specifications.clone().unwrap_or_default(),
            price: self
                .price
                .clone()
                .unwrap_or_else(|| PRICE_ON_REQUEST.to_string()),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| Category::default().canonical().to_string()),
            images: self.images.clone(),
            is_featured: self.is_featured.unwrap_or(false),
            is_visible: self.is_visible.unwrap_or(true),
            created_at: self.created_at.unwrap_or(0),
        })
    }
}

impl From<Product> for ProductDraft {
    fn from(p: Product) -> Self {
        Self {
            id: Some(p.id),
            title: Some(p.title),
            description: Some(p.description),
            specifications: Some(p.specifications),
            price: Some(p.price),
            category: Some(p.category),
            images: p.images,
            is_featured: Some(p.is_featured),
            is_visible: Some(p.is_visible),
            created_at: Some(p.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRules {
    pub require_images: bool,
}

impl Default for CommitRules {
    fn default() -> Self {
        Self {
            require_images: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CommitError {
    #[error("product id or title is missing")]
    MissingFields,

    #[error("product has no images")]
    NoImages,

    #[error("backend did not accept the product")]
    SaveFailed,

    #[error("no product is open for editing")]
    NoDraft,
}

impl CommitError {
    /// UI string key for the message shown to the admin.
    pub fn message_key(&self) -> &'static str {
        match self {
            CommitError::MissingFields => "admin.required_fields",
            CommitError::NoImages => "admin.image_required",
            CommitError::SaveFailed | CommitError::NoDraft => "admin.save_failed",
        }
    }
}

/// One uploaded image file.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    fn mime(&self) -> String {
        match self.content_type.as_deref().map(str::trim) {
            Some(declared) if !declared.is_empty() && declared != "application/octet-stream" => {
                declared.to_string()
            }
            _ => mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        }
    }

    /// Encode as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime(), STANDARD.encode(&self.bytes))
    }
}

/// Editing state for one draft, including drag-and-drop feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    pub draft: ProductDraft,
    dragged_index: Option<usize>,
    drag_over_index: Option<usize>,
}

impl EditSession {
    pub fn new(draft: ProductDraft) -> Self {
        Self {
            draft,
            dragged_index: None,
            drag_over_index: None,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.draft.images
    }

    pub fn dragged_index(&self) -> Option<usize> {
        self.dragged_index
    }

    pub fn drag_over_index(&self) -> Option<usize> {
        self.drag_over_index
    }

    /// Convert every upload to a data URI and append the batch in input
    /// order. Files are encoded concurrently; a file whose encoding task
    /// fails is skipped. Returns how many images were added.
    pub async fn add_images(&mut self, uploads: Vec<ImageUpload>) -> usize {
        let tasks = uploads.into_iter().map(|upload| {
            tokio::task::spawn_blocking(move || (upload.file_name.clone(), upload.to_data_uri()))
        });

        let mut added = 0;
        for result in join_all(tasks).await {
            match result {
                Ok((file_name, uri)) => {
                    debug!("Encoded {} ({} bytes as data URI)", file_name, uri.len());
                    self.draft.images.push(uri);
                    added += 1;
                }
                Err(e) => error!("Image encoding task failed: {}", e),
            }
        }
        added
    }

    /// Remove the image at `index`; out-of-range indices are ignored.
    pub fn remove_image(&mut self, index: usize) {
        if index < self.draft.images.len() {
            self.draft.images.remove(index);
        }
    }

    /// Move the image at `from` so it lands at `to` in the list without it.
    pub fn reorder(&mut self, from: usize, to: usize) {
        let images = &mut self.draft.images;
        if from == to || from >= images.len() {
            return;
        }
        let image = images.remove(from);
        let to = to.min(images.len());
        images.insert(to, image);
    }

    pub fn begin_drag(&mut self, index: usize) {
        self.dragged_index = Some(index);
    }

    pub fn drag_over(&mut self, index: usize) {
        self.drag_over_index = Some(index);
    }

    pub fn drop_on(&mut self, index: usize) {
        if let Some(from) = self.dragged_index.take() {
            self.reorder(from, index);
        }
        self.drag_over_index = None;
    }

    pub fn end_drag(&mut self) {
        self.dragged_index = None;
        self.drag_over_index = None;
    }

    /// Validate and persist the draft. The draft is left untouched so a
    /// failed commit can be retried.
    pub async fn commit(
        &self,
        gateway: &SupabaseGateway,
        rules: CommitRules,
    ) -> Result<Product, CommitError> {
        let product = self.draft.to_product(rules)?;
        if gateway.save_product(&product).await {
            Ok(product)
        } else {
            Err(CommitError::SaveFailed)
        }
    }
}

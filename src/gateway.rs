//! Persistence gateway over the Supabase REST API (PostgREST).
//!
//! Storage rows are flat, with one `_sq`/`_en` column pair per localized
//! field; this module maps them to and from the nested domain types.
//!
//! Every public operation swallows backend failures after logging them:
//! reads return an empty list or `None`, writes return `false`.

use crate::config::Config;
use crate::models::{
    is_valid_product_id, ContactSubmission, LocalizedString, NewContactSubmission, Product,
    ProductSpecifications,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

const PRODUCTS: &str = "products";
const CONTACT_SUBMISSIONS: &str = "contact_submissions";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

// ==================== Storage Rows ====================

#[derive(Debug, Deserialize)]
struct ProductRow {
    id: String,
    title_sq: Option<String>,
    title_en: Option<String>,
    description_sq: Option<String>,
    description_en: Option<String>,
    dimensions_sq: Option<String>,
    dimensions_en: Option<String>,
    materials_sq: Option<String>,
    materials_en: Option<String>,
    price: Option<String>,
    category: Option<String>,
    images: Option<Vec<String>>,
    is_featured: Option<bool>,
    is_visible: Option<bool>,
    created_at: Option<String>,
}

/// Every mapped `products` column except `id` and `created_at`.
#[derive(Debug, Serialize)]
struct ProductColumns<'a> {
    title_sq: &'a str,
    title_en: &'a str,
    description_sq: &'a str,
    description_en: &'a str,
    dimensions_sq: &'a str,
    dimensions_en: &'a str,
    materials_sq: &'a str,
    materials_en: &'a str,
    price: &'a str,
    category: &'a str,
    images: &'a [String],
    is_featured: bool,
    is_visible: bool,
}

#[derive(Debug, Serialize)]
struct NewProductRow<'a> {
    id: &'a str,
    #[serde(flatten)]
    columns: ProductColumns<'a>,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct ContactRow {
    id: String,
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
    date: Option<String>,
    read: Option<bool>,
}

#[derive(Debug, Serialize)]
struct NewContactRow<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
    date: String,
    read: bool,
}

fn localized(sq: Option<String>, en: Option<String>) -> LocalizedString {
    LocalizedString {
        sq: sq.unwrap_or_default(),
        en: en.unwrap_or_default(),
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let created_at = timestamp_millis(row.created_at.as_deref(), &row.id);
        Product {
            title: localized(row.title_sq, row.title_en),
            description: localized(row.description_sq, row.description_en),
            specifications: ProductSpecifications {
                dimensions: localized(row.dimensions_sq, row.dimensions_en),
                materials: localized(row.materials_sq, row.materials_en),
            },
            price: row.price.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            images: row.images.unwrap_or_default(),
            is_featured: row.is_featured.unwrap_or(false),
            is_visible: row.is_visible.unwrap_or(false),
            created_at,
            id: row.id,
        }
    }
}

impl<'a> From<&'a Product> for ProductColumns<'a> {
    fn from(p: &'a Product) -> Self {
        ProductColumns {
            title_sq: &p.title.sq,
            title_en: &p.title.en,
            description_sq: &p.description.sq,
            description_en: &p.description.en,
            dimensions_sq: &p.specifications.dimensions.sq,
            dimensions_en: &p.specifications.dimensions.en,
            materials_sq: &p.specifications.materials.sq,
            materials_en: &p.specifications.materials.en,
            price: &p.price,
            category: &p.category,
            images: &p.images,
            is_featured: p.is_featured,
            is_visible: p.is_visible,
        }
    }
}

impl From<ContactRow> for ContactSubmission {
    fn from(row: ContactRow) -> Self {
        let date = timestamp_millis(row.date.as_deref(), &row.id);
        ContactSubmission {
            name: row.name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            message: row.message.unwrap_or_default(),
            date,
            read: row.read.unwrap_or(false),
            id: row.id,
        }
    }
}

/// Parse a storage timestamp into epoch milliseconds.
///
/// Accepts RFC 3339 and zone-less ISO timestamps (read as UTC).
pub fn parse_timestamp_millis(value: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

fn timestamp_millis(value: Option<&str>, row_id: &str) -> i64 {
    match value.map(parse_timestamp_millis) {
        Some(Some(millis)) => millis,
        Some(None) => {
            warn!("Unparsable timestamp {:?} on row {}", value, row_id);
            0
        }
        None => 0,
    }
}

async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Status { status, body })
}

// ==================== Gateway ====================

/// CRUD access to the `products` and `contact_submissions` tables.
#[derive(Debug, Clone)]
pub struct SupabaseGateway {
    client: reqwest::Client,
    rest_url: String,
    anon_key: String,
    bearer: String,
}

impl SupabaseGateway {
    pub fn new(supabase_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            rest_url: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            bearer: anon_key.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.supabase_url, &config.supabase_anon_key)
    }

    /// A gateway acting as a signed-in user, so row-level security admits
    /// admin writes.
    pub fn with_access_token(&self, access_token: &str) -> Self {
        Self {
            bearer: access_token.to_string(),
            ..self.clone()
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.bearer)
    }

    // ==================== Products ====================

    /// All products, newest first. Empty on failure.
    pub async fn list_products(&self) -> Vec<Product> {
        match self.fetch_products().await {
            Ok(products) => products,
            Err(e) => {
                error!("Error fetching products: {}", e);
                Vec::new()
            }
        }
    }

    /// The product with `id`, or `None` when missing or on failure.
    pub async fn get_product(&self, id: &str) -> Option<Product> {
        match self.fetch_product(id).await {
            Ok(product) => product,
            Err(e) => {
                error!("Error fetching product {}: {}", id, e);
                None
            }
        }
    }

    /// Insert or fully replace a product.
    ///
    /// Ids without the UUID shape are rejected before any request is made.
    /// Probe and write are separate requests, so concurrent saves of the same
    /// new id can both insert; the last write wins otherwise.
    pub async fn save_product(&self, product: &Product) -> bool {
        if !is_valid_product_id(&product.id) {
            error!("Invalid UUID format: {}", product.id);
            return false;
        }

        match self.upsert_product(product).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving product {}: {}", product.id, e);
                false
            }
        }
    }

    pub async fn delete_product(&self, id: &str) -> bool {
        let result = async {
            let response = self
                .request(Method::DELETE, PRODUCTS)
                .query(&[("id", format!("eq.{}", id))])
                .send()
                .await?;
            ensure_success(response).await?;
            Ok::<_, GatewayError>(())
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Error deleting product {}: {}", id, e);
                false
            }
        }
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, GatewayError> {
        let response = self
            .request(Method::GET, PRODUCTS)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        let rows: Vec<ProductRow> = ensure_success(response).await?.json().await?;
        debug!("Fetched {} products", rows.len());
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn fetch_product(&self, id: &str) -> Result<Option<Product>, GatewayError> {
        let response = self
            .request(Method::GET, PRODUCTS)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))])
            .send()
            .await?;
        let rows: Vec<ProductRow> = ensure_success(response).await?.json().await?;
        Ok(rows.into_iter().next().map(Product::from))
    }

    async fn product_exists(&self, id: &str) -> Result<bool, GatewayError> {
        let response = self
            .request(Method::GET, PRODUCTS)
            .query(&[("select", "id".to_string()), ("id", format!("eq.{}", id))])
            .send()
            .await?;
        let rows: Vec<serde_json::Value> = ensure_success(response).await?.json().await?;
        Ok(!rows.is_empty())
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), GatewayError> {
        let columns = ProductColumns::from(product);

        let response = if self.product_exists(&product.id).await? {
            debug!("Updating product {}", product.id);
            self.request(Method::PATCH, PRODUCTS)
                .query(&[("id", format!("eq.{}", product.id))])
                .json(&columns)
                .send()
                .await?
        } else {
            debug!("Creating product {}", product.id);
            let row = NewProductRow {
                id: &product.id,
                columns,
                created_at: Utc::now().to_rfc3339(),
            };
            self.request(Method::POST, PRODUCTS)
                .header("Prefer", "return=minimal")
                .json(&row)
                .send()
                .await?
        };

        ensure_success(response).await?;
        Ok(())
    }

    // ==================== Contact Submissions ====================

    /// All contact submissions, newest first. Empty on failure.
    pub async fn list_messages(&self) -> Vec<ContactSubmission> {
        let result = async {
            let response = self
                .request(Method::GET, CONTACT_SUBMISSIONS)
                .query(&[("select", "*"), ("order", "date.desc")])
                .send()
                .await?;
            let rows: Vec<ContactRow> = ensure_success(response).await?.json().await?;
            Ok::<_, GatewayError>(rows)
        }
        .await;

        match result {
            Ok(rows) => rows.into_iter().map(ContactSubmission::from).collect(),
            Err(e) => {
                error!("Error fetching messages: {}", e);
                Vec::new()
            }
        }
    }

    /// Store a visitor message as unread, stamped with the current time.
    pub async fn save_message(&self, message: &NewContactSubmission) -> bool {
        let row = NewContactRow {
            name: &message.name,
            email: &message.email,
            message: &message.message,
            date: Utc::now().to_rfc3339(),
            read: false,
        };

        let result = async {
            let response = self
                .request(Method::POST, CONTACT_SUBMISSIONS)
                .header("Prefer", "return=minimal")
                .json(&row)
                .send()
                .await?;
            ensure_success(response).await?;
            Ok::<_, GatewayError>(())
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving message: {}", e);
                false
            }
        }
    }

    /// Set `read = true`. Idempotent.
    pub async fn mark_message_read(&self, id: &str) -> bool {
        let result = async {
            let response = self
                .request(Method::PATCH, CONTACT_SUBMISSIONS)
                .query(&[("id", format!("eq.{}", id))])
                .json(&serde_json::json!({ "read": true }))
                .send()
                .await?;
            ensure_success(response).await?;
            Ok::<_, GatewayError>(())
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Error marking message {} as read: {}", id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const PRODUCT_ID: &str = "3f2504e0-4f89-41d3-9a0c-0305e82c3301";

    // ==================== Helper Functions ====================

    fn gateway(server: &MockServer) -> SupabaseGateway {
        SupabaseGateway::new(&server.uri(), "anon-key")
    }

    fn product_row(id: &str, created_at: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title_sq": "Divan",
            "title_en": "Sofa",
            "description_sq": "Divan lëkure",
            "description_en": "Leather sofa",
            "dimensions_sq": "200x90cm",
            "dimensions_en": "200x90cm",
            "materials_sq": "Lëkurë",
            "materials_en": "Leather",
            "price": "On Request",
            "category": "Dhoma e Ditës",
            "images": ["https://cdn.example.com/sofa-1.jpg", "https://cdn.example.com/sofa-2.jpg"],
            "is_featured": true,
            "is_visible": true,
            "created_at": created_at
        })
    }

    fn sample_product() -> Product {
        Product {
            id: PRODUCT_ID.to_string(),
            title: LocalizedString::new("Tavolinë", "Table"),
            description: LocalizedString::new("Tavolinë druri", "Wooden table"),
            specifications: ProductSpecifications {
                dimensions: LocalizedString::new("180x90", "180x90"),
                materials: LocalizedString::new("Lis", "Oak"),
            },
            price: "On Request".to_string(),
            category: "Kuzhinat".to_string(),
            images: vec!["data:image/png;base64,AAAA".to_string()],
            is_featured: false,
            is_visible: true,
            created_at: 0,
        }
    }

    // ==================== Row Mapping Tests ====================

    #[test]
    fn test_product_row_maps_localized_columns() {
        let row: ProductRow =
            serde_json::from_value(product_row(PRODUCT_ID, "2024-01-15T10:30:00+00:00")).unwrap();
        let product = Product::from(row);

        assert_eq!(product.title, LocalizedString::new("Divan", "Sofa"));
        assert_eq!(product.specifications.materials.en, "Leather");
        assert_eq!(product.images.len(), 2);
        assert!(product.is_featured);
        assert_eq!(product.created_at, 1_705_314_600_000);
    }

    #[test]
    fn test_product_row_with_nulls() {
        let row: ProductRow = serde_json::from_value(serde_json::json!({
            "id": PRODUCT_ID,
            "title_sq": "Karrige",
            "title_en": null,
            "images": null,
            "created_at": null
        }))
        .unwrap();
        let product = Product::from(row);

        assert_eq!(product.title.en, "");
        assert!(product.images.is_empty());
        assert!(!product.is_visible);
        assert_eq!(product.created_at, 0);
    }

    #[test]
    fn test_product_columns_are_flat() {
        let product = sample_product();
        let json = serde_json::to_value(ProductColumns::from(&product)).unwrap();

        assert_eq!(json["title_sq"], "Tavolinë");
        assert_eq!(json["materials_en"], "Oak");
        assert_eq!(json["is_visible"], true);
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(
            parse_timestamp_millis("2024-01-15T10:30:00.500+00:00"),
            Some(1_705_314_600_500)
        );
        assert_eq!(
            parse_timestamp_millis("2024-01-15T10:30:00"),
            Some(1_705_314_600_000)
        );
        assert_eq!(parse_timestamp_millis("yesterday"), None);
    }

    // ==================== list_products Tests ====================

    #[tokio::test]
    async fn test_list_products_orders_by_created_desc() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .and(query_param("order", "created_at.desc"))
            .and(header("apikey", "anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                product_row(PRODUCT_ID, "2024-02-01T00:00:00+00:00"),
                product_row("7c9e6679-7425-40de-944b-e07fc1f90ae7", "2024-01-01T00:00:00+00:00"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let products = gateway(&server).list_products().await;

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, PRODUCT_ID);
    }

    #[tokio::test]
    async fn test_list_products_error_returns_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        assert!(gateway(&server).list_products().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_products_malformed_body_returns_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(gateway(&server).list_products().await.is_empty());
    }

    // ==================== get_product Tests ====================

    #[tokio::test]
    async fn test_get_product_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .and(query_param("id", format!("eq.{}", PRODUCT_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                product_row(PRODUCT_ID, "2024-02-01T00:00:00+00:00")
            ])))
            .mount(&server)
            .await;

        let product = gateway(&server).get_product(PRODUCT_ID).await;
        assert_eq!(product.map(|p| p.title.en), Some("Sofa".to_string()));
    }

    #[tokio::test]
    async fn test_get_product_missing_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        assert!(gateway(&server).get_product(PRODUCT_ID).await.is_none());
    }

    #[tokio::test]
    async fn test_get_product_error_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        assert!(gateway(&server).get_product("not-a-uuid").await.is_none());
    }

    // ==================== save_product Tests ====================

    #[tokio::test]
    async fn test_save_product_rejects_invalid_id_without_requests() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut product = sample_product();
        product.id = "not-a-uuid".to_string();

        assert!(!gateway(&server).save_product(&product).await);
    }

    #[tokio::test]
    async fn test_save_product_updates_existing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .and(query_param("select", "id"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "id": PRODUCT_ID }])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/products"))
            .and(query_param("id", format!("eq.{}", PRODUCT_ID)))
            .and(body_partial_json(serde_json::json!({
                "title_en": "Table",
                "category": "Kuzhinat",
                "images": ["data:image/png;base64,AAAA"]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        assert!(gateway(&server).save_product(&sample_product()).await);
    }

    #[tokio::test]
    async fn test_save_product_inserts_new_with_created_at() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/products"))
            .and(body_partial_json(serde_json::json!({
                "id": PRODUCT_ID,
                "title_sq": "Tavolinë"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let before = Utc::now().timestamp_millis();
        assert!(gateway(&server).save_product(&sample_product()).await);

        let requests = server.received_requests().await.unwrap();
        let insert = requests
            .iter()
            .find(|r| r.method.as_str() == "POST")
            .expect("insert request");
        let body: serde_json::Value = serde_json::from_slice(&insert.body).unwrap();
        let created_at = parse_timestamp_millis(body["created_at"].as_str().unwrap()).unwrap();
        assert!(created_at >= before - 1000);
    }

    #[tokio::test]
    async fn test_save_product_write_failure_returns_false() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("row-level security"))
            .mount(&server)
            .await;

        assert!(!gateway(&server).save_product(&sample_product()).await);
    }

    #[tokio::test]
    async fn test_save_product_probe_failure_returns_false() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        assert!(!gateway(&server).save_product(&sample_product()).await);
    }

    #[tokio::test]
    async fn test_access_token_is_sent_as_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/products"))
            .and(header("authorization", "Bearer admin-token"))
            .and(header("apikey", "anon-key"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let admin = gateway(&server).with_access_token("admin-token");
        assert!(admin.delete_product(PRODUCT_ID).await);
    }

    // ==================== delete_product Tests ====================

    #[tokio::test]
    async fn test_delete_product_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(!gateway(&server).delete_product(PRODUCT_ID).await);
    }

    // ==================== Contact Submission Tests ====================

    #[tokio::test]
    async fn test_list_messages_maps_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/contact_submissions"))
            .and(query_param("order", "date.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "b1",
                    "name": "Art",
                    "email": "a@b.com",
                    "message": "Hi",
                    "date": "2024-01-15T10:30:00+00:00",
                    "read": false
                }
            ])))
            .mount(&server)
            .await;

        let messages = gateway(&server).list_messages().await;

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].name, "Art");
        assert_eq!(messages[0].date, 1_705_314_600_000);
        assert!(!messages[0].read);
    }

    #[tokio::test]
    async fn test_list_messages_error_returns_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert!(gateway(&server).list_messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_message_inserts_unread_with_fresh_date() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/contact_submissions"))
            .and(body_partial_json(serde_json::json!({
                "name": "Art",
                "email": "a@b.com",
                "message": "Hi",
                "read": false
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let message = NewContactSubmission {
            name: "Art".to_string(),
            email: "a@b.com".to_string(),
            message: "Hi".to_string(),
        };
        let before = Utc::now().timestamp_millis();

        assert!(gateway(&server).save_message(&message).await);

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("id").is_none());
        let date = parse_timestamp_millis(body["date"].as_str().unwrap()).unwrap();
        assert!(date >= before - 1000);
    }

    #[tokio::test]
    async fn test_save_message_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(!gateway(&server).save_message(&NewContactSubmission::default()).await);
    }

    #[tokio::test]
    async fn test_mark_message_read_is_idempotent() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/contact_submissions"))
            .and(query_param("id", "eq.b1"))
            .and(body_partial_json(serde_json::json!({ "read": true })))
            .respond_with(ResponseTemplate::new(204))
            .expect(2)
            .mount(&server)
            .await;

        let gateway = gateway(&server);
        assert!(gateway.mark_message_read("b1").await);
        assert!(gateway.mark_message_read("b1").await);
    }
}

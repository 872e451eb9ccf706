//! Admin dashboard state: loaded records, the open tab and the edit session.

use crate::editor::{CommitError, CommitRules, EditSession, ProductDraft};
use crate::gateway::SupabaseGateway;
use crate::models::{ContactSubmission, Product};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Products,
    Messages,
}

impl Tab {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("messages") => Tab::Messages,
            _ => Tab::Products,
        }
    }
}

#[derive(Debug, Default)]
pub struct Dashboard {
    pub tab: Tab,
    products: Vec<Product>,
    messages: Vec<ContactSubmission>,
    editing: Option<EditSession>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn messages(&self) -> &[ContactSubmission] {
        &self.messages
    }

    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.read).count()
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditSession> {
        self.editing.as_mut()
    }

    /// Reload products and messages together.
    pub async fn refresh(&mut self, gateway: &SupabaseGateway) {
        let (products, messages) = tokio::join!(gateway.list_products(), gateway.list_messages());
        self.products = products;
        self.messages = messages;
    }

    pub fn start_new(&mut self) {
        self.editing = Some(EditSession::new(ProductDraft::new_product()));
    }

    /// Open the loaded product `id` for editing. `false` if it is not loaded.
    pub fn start_edit(&mut self, id: &str) -> bool {
        match self.products.iter().find(|p| p.id == id) {
            Some(product) => {
                self.editing = Some(EditSession::new(ProductDraft::from(product.clone())));
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Whether the open draft is a product not yet in the loaded list.
    pub fn is_new_draft(&self) -> bool {
        match self.editing.as_ref().and_then(|s| s.draft.id.as_deref()) {
            Some(id) => !self.products.iter().any(|p| p.id == id),
            None => false,
        }
    }

    /// Commit the open draft. Success closes the session and reloads;
    /// failure keeps the session for another try.
    pub async fn save(
        &mut self,
        gateway: &SupabaseGateway,
        rules: CommitRules,
    ) -> Result<(), CommitError> {
        let Some(session) = self.editing.as_ref() else {
            return Err(CommitError::NoDraft);
        };

        let product = session.commit(gateway, rules).await?;
        info!("Saved product {}", product.id);
        self.editing = None;
        self.refresh(gateway).await;
        Ok(())
    }

    pub async fn delete(&mut self, gateway: &SupabaseGateway, id: &str) -> bool {
        if !gateway.delete_product(id).await {
            warn!("Product {} was not deleted", id);
            return false;
        }
        info!("Deleted product {}", id);
        self.refresh(gateway).await;
        true
    }

    pub async fn mark_read(&mut self, gateway: &SupabaseGateway, id: &str) -> bool {
        if !gateway.mark_message_read(id).await {
            return false;
        }
        self.refresh(gateway).await;
        true
    }
}

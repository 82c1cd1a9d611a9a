//! Store abstraction
//!
//! Everything the order desk reads goes through [`OrderStore`]. Rows are
//! normalized on the way in (see [`OrderItem::normalize`]), so callers can
//! rely on the line-item invariants.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderActivity, OrderItem, Receipt, SizeTypeDefinition};

use crate::error::ClientResult;

/// Read access to the order tables, plus the receipt foreign-key backfill
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Look up an order by its human-readable number
    async fn order_by_number(&self, order_number: &str) -> ClientResult<Order>;

    async fn order_by_id(&self, order_id: &str) -> ClientResult<Order>;

    async fn order_items(&self, order_id: &str) -> ClientResult<Vec<OrderItem>>;

    /// Receipts that may reference the order, by id or by number.
    ///
    /// This is a superset; the reconciler decides which ones actually match.
    async fn receipts_for(&self, order: &Order) -> ClientResult<Vec<Receipt>>;

    async fn activities(&self, order_id: &str) -> ClientResult<Vec<OrderActivity>>;

    async fn size_types(&self) -> ClientResult<Vec<SizeTypeDefinition>>;

    /// Write the direct order reference onto a receipt
    async fn link_receipt(&self, receipt_id: &str, order_id: &str) -> ClientResult<()>;
}

/// Every table the desk reads, as one JSON document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub receipts: Vec<Receipt>,
    #[serde(default)]
    pub activities: Vec<OrderActivity>,
    #[serde(default)]
    pub size_types: Vec<SizeTypeDefinition>,
}

/// Apply boundary normalization to freshly decoded line items
pub(crate) fn normalize_items(mut items: Vec<OrderItem>) -> Vec<OrderItem> {
    for item in &mut items {
        item.normalize();
    }
    items
}

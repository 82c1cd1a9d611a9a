//! In-memory store
//!
//! Holds a [`StoreSnapshot`] behind a lock. Used for offline review of an
//! exported snapshot and as the store in tests. Zero network overhead.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{Order, OrderActivity, OrderItem, Receipt, SizeTypeDefinition};
use std::path::Path;

use crate::error::{ClientError, ClientResult};
use crate::store::{OrderStore, StoreSnapshot, normalize_items};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: RwLock<StoreSnapshot>,
}

impl InMemoryStore {
    pub fn new(mut snapshot: StoreSnapshot) -> Self {
        snapshot.order_items = normalize_items(std::mem::take(&mut snapshot.order_items));
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    pub fn from_json(json: &str) -> ClientResult<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot))
    }

    /// Load a snapshot exported to a JSON file
    pub async fn load(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let store = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "Loaded store snapshot");
        Ok(store)
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshot.read().clone()
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn order_by_number(&self, order_number: &str) -> ClientResult<Order> {
        self.snapshot
            .read()
            .orders
            .iter()
            .find(|o| o.order_number == order_number)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("order {}", order_number)))
    }

    async fn order_by_id(&self, order_id: &str) -> ClientResult<Order> {
        self.snapshot
            .read()
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("order id {}", order_id)))
    }

    async fn order_items(&self, order_id: &str) -> ClientResult<Vec<OrderItem>> {
        Ok(self
            .snapshot
            .read()
            .order_items
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn receipts_for(&self, order: &Order) -> ClientResult<Vec<Receipt>> {
        Ok(self
            .snapshot
            .read()
            .receipts
            .iter()
            .filter(|r| {
                r.reference_id.as_deref() == Some(order.id.as_str())
                    || r.reference_number.as_deref() == Some(order.order_number.as_str())
            })
            .cloned()
            .collect())
    }

    async fn activities(&self, order_id: &str) -> ClientResult<Vec<OrderActivity>> {
        Ok(self
            .snapshot
            .read()
            .activities
            .iter()
            .filter(|a| a.order_id.as_deref() == Some(order_id))
            .cloned()
            .collect())
    }

    async fn size_types(&self) -> ClientResult<Vec<SizeTypeDefinition>> {
        Ok(self.snapshot.read().size_types.clone())
    }

    async fn link_receipt(&self, receipt_id: &str, order_id: &str) -> ClientResult<()> {
        let mut snapshot = self.snapshot.write();
        let receipt = snapshot
            .receipts
            .iter_mut()
            .find(|r| r.id == receipt_id)
            .ok_or_else(|| ClientError::NotFound(format!("receipt {}", receipt_id)))?;
        receipt.reference_id = Some(order_id.to_string());
        Ok(())
    }
}

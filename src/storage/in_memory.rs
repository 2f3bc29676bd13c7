//! In-memory record and label stores for testing and development

use crate::core::{Order, OrderFilter, OrderStore, StorageError};
use crate::labels::{Label, LabelStore};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

const BACKEND: &str = "in-memory";

fn poisoned() -> StorageError {
    StorageError::Unavailable {
        backend: BACKEND.to_string(),
    }
}

/// In-memory order store
///
/// Orders are scanned in insertion order. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given orders
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
        }
    }

    /// Append orders
    pub fn insert(&self, orders: impl IntoIterator<Item = Order>) -> Result<(), StorageError> {
        let mut stored = self.orders.write().map_err(|_| poisoned())?;
        stored.extend(orders);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find(&self, filter: &OrderFilter) -> Result<Vec<Order>, StorageError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;

        Ok(orders
            .iter()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &OrderFilter) -> Result<usize, StorageError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;

        Ok(orders.iter().filter(|order| filter.matches(order)).count())
    }
}

/// In-memory label store keyed by label key
#[derive(Clone, Default)]
pub struct InMemoryLabelStore {
    labels: Arc<RwLock<IndexMap<String, Label>>>,
}

impl InMemoryLabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given labels (later duplicates win)
    pub fn with_labels(labels: Vec<Label>) -> Self {
        Self {
            labels: Arc::new(RwLock::new(
                labels
                    .into_iter()
                    .map(|label| (label.key.clone(), label))
                    .collect(),
            )),
        }
    }
}

#[async_trait]
impl LabelStore for InMemoryLabelStore {
    async fn list(&self) -> Result<Vec<Label>, StorageError> {
        let labels = self.labels.read().map_err(|_| poisoned())?;

        Ok(labels.values().cloned().collect())
    }

    async fn get(&self, key: &str) -> Result<Option<Label>, StorageError> {
        let labels = self.labels.read().map_err(|_| poisoned())?;

        Ok(labels.get(key).cloned())
    }

    async fn update(&self, key: &str, value: &str) -> Result<Option<Label>, StorageError> {
        let mut labels = self.labels.write().map_err(|_| poisoned())?;

        Ok(labels.get_mut(key).map(|label| {
            label.value = value.to_string();
            label.clone()
        }))
    }

    async fn seed(&self, seed: Vec<Label>) -> Result<usize, StorageError> {
        let mut labels = self.labels.write().map_err(|_| poisoned())?;
        if !labels.is_empty() {
            return Ok(0);
        }

        labels.extend(seed.into_iter().map(|label| (label.key.clone(), label)));
        Ok(labels.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OrderStatus, Region};
    use crate::labels::Usage;
    use chrono::{TimeZone, Utc};

    fn order(id: &str, status: OrderStatus) -> Order {
        Order::new(
            id,
            "Alice",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            "10".parse().unwrap(),
            status,
            Region::Europe,
        )
    }

    fn label(key: &str, value: &str) -> Label {
        Label {
            key: key.to_string(),
            value: value.to_string(),
            usages: vec![Usage {
                page: "Dashboard".to_string(),
                component: "Revenue Line Chart".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let store = InMemoryOrderStore::new();
        store
            .insert(vec![
                order("ORD-2", OrderStatus::Completed),
                order("ORD-1", OrderStatus::Pending),
                order("ORD-3", OrderStatus::Completed),
            ])
            .unwrap();

        let all = store.find(&OrderFilter::all()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-2", "ORD-1", "ORD-3"]);
    }

    #[tokio::test]
    async fn test_find_and_count_apply_filter() {
        let store = InMemoryOrderStore::with_orders(vec![
            order("ORD-1", OrderStatus::Completed),
            order("ORD-2", OrderStatus::Pending),
        ]);

        let completed = store.find(&OrderFilter::completed()).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].order_id, "ORD-1");
        assert_eq!(store.count(&OrderFilter::all()).await.unwrap(), 2);
        assert_eq!(store.count(&OrderFilter::completed()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_label_get_and_update() {
        let store = InMemoryLabelStore::with_labels(vec![
            label("metric_revenue", "Revenue Overview"),
            label("orders_card", "Total Orders"),
        ]);

        let found = store.get("metric_revenue").await.unwrap().unwrap();
        assert_eq!(found.value, "Revenue Overview");
        assert!(store.get("missing").await.unwrap().is_none());

        let updated = store.update("orders_card", "Orders").await.unwrap().unwrap();
        assert_eq!(updated.value, "Orders");
        assert_eq!(updated.usages.len(), 1);
        assert_eq!(store.get("orders_card").await.unwrap().unwrap().value, "Orders");

        assert!(store.update("missing", "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_store() {
        let store = InMemoryLabelStore::new();
        assert_eq!(store.seed(vec![label("a", "A"), label("b", "B")]).await.unwrap(), 2);
        assert_eq!(store.seed(vec![label("c", "C")]).await.unwrap(), 0);
        assert!(store.get("c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_label_list_keeps_insertion_order() {
        let store = InMemoryLabelStore::with_labels(vec![label("b", "B"), label("a", "A")]);
        let keys: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.key)
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}

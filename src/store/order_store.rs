use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::order::{Order, OrderError, OrderId};

// ============================================================================
// Order Store - Keyed table of orders
// ============================================================================
//
// Responsibilities:
// 1. Insert or overwrite an order by id
// 2. Look up an order by id
// 3. Apply read-modify-write changes atomically
//
// No eviction, no size bound, nothing survives a restart.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),
}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => OrderError::not_found(id),
        }
    }
}

#[derive(Default)]
pub struct OrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Readers see either the previous value or this
    /// one, never a mix.
    pub async fn put(&self, order: Order) {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order);
    }

    pub async fn get(&self, id: &OrderId) -> Result<Order, StoreError> {
        let orders = self.orders.read().await;
        orders.get(id).cloned().ok_or(StoreError::NotFound(*id))
    }

    /// Run `change` against a copy of the stored order while holding the
    /// write lock; the copy replaces the stored value only if `change`
    /// succeeds. Returns whatever `change` produced alongside the new value.
    pub async fn update<F, T, E>(&self, id: &OrderId, change: F) -> Result<(T, Order), E>
    where
        F: FnOnce(&mut Order) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut orders = self.orders.write().await;
        let current = orders.get(id).ok_or(StoreError::NotFound(*id))?;

        let mut next = current.clone();
        let output = change(&mut next)?;

        orders.insert(*id, next.clone());
        Ok((output, next))
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;
    use std::sync::Arc;

    fn order(items: &[&str]) -> Order {
        Order::receive(items.iter().map(|s| s.to_string()).collect())
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = OrderStore::new();
        let o = order(&["item-1"]);

        store.put(o.clone()).await;

        assert_eq!(store.get(&o.id).await.unwrap(), o);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let store = OrderStore::new();
        let id = OrderId::generate();

        let err = store.get(&id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = OrderStore::new();
        let mut o = order(&["item-1"]);
        store.put(o.clone()).await;

        o.item_ids.push("item-2".to_string());
        store.put(o.clone()).await;

        assert_eq!(store.get(&o.id).await.unwrap().item_ids, vec!["item-1", "item-2"]);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_value() {
        let store = OrderStore::new();
        let o = order(&["item-1"]);
        store.put(o.clone()).await;

        let result: Result<((), Order), OrderError> = store
            .update(&o.id, |order| {
                order.item_ids.clear();
                order.transition_to(OrderStatus::Confirmed)
            })
            .await;

        assert!(matches!(result, Err(OrderError::InvalidStatusTransition { .. })));
        assert_eq!(store.get(&o.id).await.unwrap(), o);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = OrderStore::new();

        let result: Result<((), Order), OrderError> = store
            .update(&OrderId::generate(), |order| order.transition_to(OrderStatus::Validated))
            .await;

        assert!(matches!(result, Err(OrderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_returns_value_seen_under_lock() {
        let store = OrderStore::new();
        let o = order(&["item-1"]);
        store.put(o.clone()).await;

        let (before, after) = store
            .update(&o.id, |order| {
                let before = order.status;
                order.transition_to(OrderStatus::Validated)?;
                Ok::<_, OrderError>(before)
            })
            .await
            .unwrap();

        assert_eq!(before, OrderStatus::Received);
        assert_eq!(after.status, OrderStatus::Validated);
        assert_eq!(store.get(&o.id).await.unwrap(), after);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_put_and_get_never_see_partial_order() {
        let store = Arc::new(OrderStore::new());
        let id = OrderId::generate();

        let short = Order { id, item_ids: vec!["a".to_string()], status: OrderStatus::Received };
        let long = Order {
            id,
            item_ids: (0..64).map(|i| format!("item-{}", i)).collect(),
            status: OrderStatus::Validated,
        };
        store.put(short.clone()).await;

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            let value = if i % 2 == 0 { short.clone() } else { long.clone() };
            handles.push(tokio::spawn(async move { store.put(value).await }));
        }
        for _ in 0..32 {
            let store = store.clone();
            let (short, long) = (short.clone(), long.clone());
            handles.push(tokio::spawn(async move {
                let seen = store.get(&id).await.unwrap();
                assert!(seen == short || seen == long);
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }
    }
}

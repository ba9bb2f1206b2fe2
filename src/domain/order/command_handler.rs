use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::discovery::{Address, DiscoveryError, ServiceLocator};
use crate::metrics::Metrics;
use crate::store::OrderStore;

use super::aggregate::Order;
use super::commands::{AdvanceStatus, SubmitOrder};
use super::errors::OrderError;
use super::value_objects::OrderId;

// ============================================================================
// Order Lifecycle - Command Handler
// ============================================================================
//
// Orchestrates: Command -> Validation -> Dependency Resolution -> Store
//
// Submission gates on the catalog dependency: if the catalog cannot be
// located, nothing is written. Orders are stored as `received`; later
// transitions go through `transition`, which checks the status graph under
// the store's write lock.
//
// ============================================================================

pub struct OrderLifecycle {
    store: Arc<OrderStore>,
    locator: Arc<dyn ServiceLocator>,
    metrics: Arc<Metrics>,
    catalog_service: String,
    resolve_timeout: Duration,
}

impl OrderLifecycle {
    pub fn new(
        store: Arc<OrderStore>,
        locator: Arc<dyn ServiceLocator>,
        metrics: Arc<Metrics>,
        catalog_service: impl Into<String>,
        resolve_timeout: Duration,
    ) -> Self {
        Self {
            store,
            locator,
            metrics,
            catalog_service: catalog_service.into(),
            resolve_timeout,
        }
    }

    /// Validate, check the catalog dependency, then store a new order.
    pub async fn submit(&self, command: SubmitOrder) -> Result<Order, OrderError> {
        let item_ids = Order::validate_items(command.item_ids).inspect_err(|e| {
            tracing::debug!(error = %e, "Rejecting malformed order submission");
            self.metrics.record_rejection(e.kind());
        })?;

        let catalog = self.resolve_catalog().await.map_err(|e| {
            tracing::warn!(
                service = %e.service_name(),
                error = %e,
                "Catalog dependency unavailable, order not created"
            );
            self.metrics.record_rejection("dependency");
            OrderError::from(e)
        })?;

        tracing::debug!(
            catalog = catalog.as_str(),
            item_count = item_ids.len(),
            "Catalog located; item validation is delegated to the catalog service"
        );

        let order = Order::receive(item_ids);
        self.store.put(order.clone()).await;
        self.metrics.record_submission();
        let stored_orders = self.store.len().await;

        tracing::info!(
            order_id = %order.id,
            item_count = order.item_ids.len(),
            status = %order.status,
            stored_orders = stored_orders,
            "Order received"
        );

        Ok(order)
    }

    /// Look up an order by the identifier a caller supplied.
    pub async fn get(&self, raw_id: &str) -> Result<Order, OrderError> {
        let id = OrderId::parse(raw_id).ok_or_else(|| OrderError::not_found(raw_id))?;

        self.store.get(&id).await.map_err(|e| {
            tracing::debug!(order_id = %id, "Order lookup missed");
            OrderError::from(e)
        })
    }

    /// Advance an existing order along the status graph.
    pub async fn transition(&self, raw_id: &str, command: AdvanceStatus) -> Result<Order, OrderError> {
        let id = OrderId::parse(raw_id).ok_or_else(|| OrderError::not_found(raw_id))?;

        let (from, order) = self
            .store
            .update(&id, |order| {
                let from = order.status;
                order.transition_to(command.status)?;
                Ok::<_, OrderError>(from)
            })
            .await?;

        self.metrics.record_transition(from.as_str(), order.status.as_str());

        tracing::info!(
            order_id = %order.id,
            from = %from,
            to = %order.status,
            "Order status changed"
        );

        Ok(order)
    }

    async fn resolve_catalog(&self) -> Result<Address, DiscoveryError> {
        let started = Instant::now();

        let result = match tokio::time::timeout(
            self.resolve_timeout,
            self.locator.resolve(&self.catalog_service),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(DiscoveryError::Timeout {
                service: self.catalog_service.clone(),
                after: self.resolve_timeout,
            }),
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.outcome(),
        };
        self.metrics.record_resolution(
            &self.catalog_service,
            outcome,
            started.elapsed().as_secs_f64(),
        );

        result
    }
}

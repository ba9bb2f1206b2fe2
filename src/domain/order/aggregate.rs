use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use super::value_objects::{OrderId, OrderStatus};

// ============================================================================
// Order Entity - Domain Logic
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub item_ids: Vec<String>,
    pub status: OrderStatus,
}

impl Order {
    /// Create a freshly received order with a newly generated identity.
    pub fn receive(item_ids: Vec<String>) -> Self {
        Self {
            id: OrderId::generate(),
            item_ids,
            status: OrderStatus::Received,
        }
    }

    /// Structural validation of a submitted item list.
    /// An empty list is accepted; a missing list or a blank reference is not.
    pub fn validate_items(item_ids: Option<Vec<String>>) -> Result<Vec<String>, OrderError> {
        let item_ids = item_ids
            .ok_or_else(|| OrderError::Validation("item_ids is required".to_string()))?;

        if let Some(position) = item_ids.iter().position(|item| item.trim().is_empty()) {
            return Err(OrderError::Validation(format!(
                "item_ids[{}] must not be blank",
                position
            )));
        }

        Ok(item_ids)
    }

    /// Move along the status graph, refusing anything backwards or out of a
    /// terminal state.
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_assigns_identity_and_initial_status() {
        let order = Order::receive(vec!["item-1".to_string()]);
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.item_ids, vec!["item-1"]);
        assert!(!order.id.to_string().is_empty());
    }

    #[test]
    fn test_receive_never_reuses_identity() {
        let a = Order::receive(vec![]);
        let b = Order::receive(vec![]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_validate_items_requires_list() {
        let err = Order::validate_items(None).unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[test]
    fn test_validate_items_accepts_empty_list() {
        assert_eq!(Order::validate_items(Some(vec![])).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_validate_items_rejects_blank_reference() {
        let err = Order::validate_items(Some(vec!["item-1".to_string(), "  ".to_string()]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid order: item_ids[1] must not be blank");
    }

    #[test]
    fn test_transition_forward() {
        let mut order = Order::receive(vec![]);
        order.transition_to(OrderStatus::Validated).unwrap();
        order.transition_to(OrderStatus::Confirmed).unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_transition_backwards_leaves_order_untouched() {
        let mut order = Order::receive(vec![]);
        order.transition_to(OrderStatus::Rejected).unwrap();

        let err = order.transition_to(OrderStatus::Validated).unwrap_err();
        assert!(matches!(
            err,
            OrderError::InvalidStatusTransition {
                from: OrderStatus::Rejected,
                to: OrderStatus::Validated
            }
        ));
        assert_eq!(order.status, OrderStatus::Rejected);
    }

    #[test]
    fn test_order_wire_format() {
        let order = Order::receive(vec!["item-1".to_string(), "item-2".to_string()]);
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["id"], order.id.to_string());
        assert_eq!(value["item_ids"], serde_json::json!(["item-1", "item-2"]));
        assert_eq!(value["status"], "received");
    }
}

use serde::Deserialize;

use super::value_objects::OrderStatus;

// ============================================================================
// Order Commands - Represent caller intent
// ============================================================================

/// New order submission as decoded from the wire.
/// `item_ids` stays optional here so that a missing or null list reaches
/// validation instead of failing inside the decoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitOrder {
    #[serde(default)]
    pub item_ids: Option<Vec<String>>,
}

impl SubmitOrder {
    pub fn with_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            item_ids: Some(items.into_iter().map(Into::into).collect()),
        }
    }
}

/// Request to move an existing order along its status graph.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvanceStatus {
    pub status: OrderStatus,
}

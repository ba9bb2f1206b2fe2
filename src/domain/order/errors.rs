use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid order: {0}")]
    Validation(String),

    #[error("Dependency {service} unavailable: {reason}")]
    Dependency { service: String, reason: String },

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Cannot move order from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },
}

impl OrderError {
    pub fn not_found(id: impl ToString) -> Self {
        OrderError::NotFound(id.to_string())
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::Validation(_) => "validation",
            OrderError::Dependency { .. } => "dependency",
            OrderError::NotFound(_) => "not_found",
            OrderError::InvalidStatusTransition { .. } => "invalid_transition",
        }
    }
}

// ============================================================================
// Order Domain - Business Logic for Order Intake
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderId, OrderStatus)
// - Commands (SubmitOrder, AdvanceStatus)
// - Errors (OrderError enum)
// - Entity (Order with its status transition graph)
// - Command Handler (OrderLifecycle)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use command_handler::*;

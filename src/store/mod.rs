// ============================================================================
// Store Module
// ============================================================================
//
// In-memory order table. This is the only shared mutable state in the
// service; every read and write goes through the lock inside `OrderStore`.
//
// ============================================================================

pub mod order_store;

pub use order_store::OrderStore;

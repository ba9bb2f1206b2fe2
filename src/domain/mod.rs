// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains domain-specific entities and business logic.
// Each entity has its own subdirectory with:
// - Value objects
// - Commands
// - Errors
// - Entity implementation (status transition graph)
// - Command handler (lifecycle orchestration)
//
// Nothing in this layer knows about HTTP. Storage and service discovery are
// reached through the `store` and `discovery` modules.
//
// ============================================================================

pub mod order;

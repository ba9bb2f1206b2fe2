// ============================================================================
// HTTP Module
// ============================================================================
//
// Boundary adapter: decodes requests, calls OrderLifecycle, maps results to
// status codes. No business logic lives here.
//
// Routes:
//   GET  /health              liveness check, empty 200
//   GET  /metrics             Prometheus text format
//   POST /orders              submit an order
//   GET  /orders/{id}         fetch an order
//   PUT  /orders/{id}/status  advance an order's status
//
// ============================================================================

mod errors;
mod handlers;
mod server;

pub use handlers::configure;
pub use server::start_server;

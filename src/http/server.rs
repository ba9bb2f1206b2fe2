use actix_web::{middleware, web, App, HttpServer};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::order::OrderLifecycle;
use crate::metrics::Metrics;

use super::handlers::configure;

/// Serve the order API until the process is stopped.
/// Failing to bind is returned to the caller and aborts startup.
pub async fn start_server(
    bind: SocketAddr,
    lifecycle: Arc<OrderLifecycle>,
    metrics: Arc<Metrics>,
) -> std::io::Result<()> {
    tracing::info!("Order service starting on http://{}", bind);

    let lifecycle = web::Data::from(lifecycle);
    let metrics = web::Data::from(metrics);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(lifecycle.clone())
            .app_data(metrics.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}

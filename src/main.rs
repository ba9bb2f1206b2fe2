use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod discovery;
mod domain;
mod http;
mod metrics;
mod store;
mod utils;

use config::{LocatorSettings, Settings};
use discovery::{
    spawn_registration, DnsServiceLocator, NoopRegistrar, ServiceLocator, ServiceRegistration,
    StaticServiceLocator,
};
use domain::order::OrderLifecycle;
use store::OrderStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_service=debug")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(
        bind = %settings.bind,
        catalog = %settings.catalog_service,
        "Starting order service"
    );

    let locator = build_locator(&settings.locator);
    tracing::info!(kind = locator.kind(), "Service locator ready");

    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!("Metrics registry created with {} metrics", metrics.registry().gather().len());
    let store = Arc::new(OrderStore::new());
    let lifecycle = Arc::new(OrderLifecycle::new(
        store,
        locator,
        metrics.clone(),
        settings.catalog_service.clone(),
        settings.resolve_timeout,
    ));

    // Registration runs beside the server and never holds up startup
    spawn_registration(
        Arc::new(NoopRegistrar),
        ServiceRegistration {
            name: settings.service_name.clone(),
            address: settings.advertise_address.clone(),
        },
        settings.registration_retry.clone(),
        metrics.clone(),
    );

    http::start_server(settings.bind, lifecycle, metrics).await?;

    tracing::info!("Order service stopped");
    Ok(())
}

fn build_locator(settings: &LocatorSettings) -> Arc<dyn ServiceLocator> {
    match settings {
        LocatorSettings::Static { entries } => {
            let locator = StaticServiceLocator::new(entries.iter().cloned());
            tracing::debug!(services = locator.len(), "Loaded static service table");
            Arc::new(locator)
        }
        LocatorSettings::Dns { scheme, port } => Arc::new(DnsServiceLocator::new(scheme.clone(), *port)),
    }
}

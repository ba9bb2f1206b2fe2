use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::domain::order::OrderError;

/// Connectable endpoint of a peer service, e.g. `http://food-catalog-service:8080`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(endpoint.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("service {0} not found")]
    ServiceNotFound(String),

    #[error("resolving service {service} timed out after {after:?}")]
    Timeout { service: String, after: Duration },

    #[error("lookup of service {service} failed: {source}")]
    Lookup {
        service: String,
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    pub fn service_name(&self) -> &str {
        match self {
            DiscoveryError::ServiceNotFound(service) => service,
            DiscoveryError::Timeout { service, .. } => service,
            DiscoveryError::Lookup { service, .. } => service,
        }
    }

    /// Short label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            DiscoveryError::ServiceNotFound(_) => "not_found",
            DiscoveryError::Timeout { .. } => "timeout",
            DiscoveryError::Lookup { .. } => "lookup_error",
        }
    }
}

impl From<DiscoveryError> for OrderError {
    fn from(err: DiscoveryError) -> Self {
        OrderError::Dependency {
            service: err.service_name().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Resolves a logical service name to an address. Implementations only
/// return addressing information; they never check that the peer is up.
#[async_trait]
pub trait ServiceLocator: Send + Sync {
    async fn resolve(&self, service_name: &str) -> Result<Address, DiscoveryError>;

    /// Name of the backing mechanism, for logs.
    fn kind(&self) -> &'static str;
}

use async_trait::async_trait;
use std::collections::HashMap;

use super::locator::{Address, DiscoveryError, ServiceLocator};

// ============================================================================
// Static Service Locator
// ============================================================================
//
// Fixed name -> address table, loaded from configuration at startup.
// Read-only after construction, so lookups need no synchronization.
//
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct StaticServiceLocator {
    entries: HashMap<String, Address>,
}

impl StaticServiceLocator {
    pub fn new<I, N, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, A)>,
        N: Into<String>,
        A: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, address)| (name.into(), Address::new(address)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[async_trait]
impl ServiceLocator for StaticServiceLocator {
    async fn resolve(&self, service_name: &str) -> Result<Address, DiscoveryError> {
        self.entries
            .get(service_name)
            .cloned()
            .ok_or_else(|| DiscoveryError::ServiceNotFound(service_name.to_string()))
    }

    fn kind(&self) -> &'static str {
        "static"
    }
}

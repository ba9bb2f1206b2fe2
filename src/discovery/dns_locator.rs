use async_trait::async_trait;
use std::io;

use super::locator::{Address, DiscoveryError, ServiceLocator};

// ============================================================================
// DNS Service Locator
// ============================================================================
//
// On orchestration platforms a service name is also a resolvable host name.
// A name counts as found once the resolver yields at least one socket
// address; the returned address keeps the logical name so that the peer's
// routing (and its TLS name, if any) stays intact.
//
// The resolver reports an unknown name as an error rather than an empty
// answer, so those errors are told apart from genuine I/O failures.
//
// ============================================================================

/// Resolver messages meaning "no such name" (glibc, musl, macOS, Windows).
const UNKNOWN_NAME_MESSAGES: &[&str] = &[
    "name or service not known",
    "no address associated with hostname",
    "nodename nor servname provided",
    "name does not resolve",
    "no such host is known",
];

fn is_unknown_name(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::NotFound {
        return true;
    }
    let message = err.to_string().to_lowercase();
    UNKNOWN_NAME_MESSAGES
        .iter()
        .any(|needle| message.contains(needle))
}

#[derive(Debug, Clone)]
pub struct DnsServiceLocator {
    scheme: String,
    port: u16,
}

impl DnsServiceLocator {
    pub fn new(scheme: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            port,
        }
    }
}

#[async_trait]
impl ServiceLocator for DnsServiceLocator {
    async fn resolve(&self, service_name: &str) -> Result<Address, DiscoveryError> {
        if service_name.trim().is_empty() {
            return Err(DiscoveryError::ServiceNotFound(service_name.to_string()));
        }

        let mut addrs = tokio::net::lookup_host((service_name, self.port))
            .await
            .map_err(|source| {
                if is_unknown_name(&source) {
                    DiscoveryError::ServiceNotFound(service_name.to_string())
                } else {
                    DiscoveryError::Lookup {
                        service: service_name.to_string(),
                        source,
                    }
                }
            })?;

        match addrs.next() {
            Some(socket_addr) => {
                tracing::debug!(
                    service = %service_name,
                    resolved = %socket_addr,
                    "DNS lookup succeeded"
                );
                Ok(Address::new(format!(
                    "{}://{}:{}",
                    self.scheme, service_name, self.port
                )))
            }
            None => Err(DiscoveryError::ServiceNotFound(service_name.to_string())),
        }
    }

    fn kind(&self) -> &'static str {
        "dns"
    }
}

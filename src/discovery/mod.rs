// ============================================================================
// Discovery Module
// ============================================================================
//
// Name resolution for peer services and best-effort self-registration.
//
// Structure:
// - locator.rs        - ServiceLocator trait, Address, DiscoveryError
// - static_locator.rs - Fixed name -> address table (config or tests)
// - dns_locator.rs    - Platform DNS (service names are host names)
// - registration.rs   - Background self-registration with retry
//
// ============================================================================

mod locator;
mod static_locator;
mod dns_locator;
mod registration;

pub use locator::{Address, DiscoveryError, ServiceLocator};
pub use static_locator::StaticServiceLocator;
pub use dns_locator::DnsServiceLocator;
pub use registration::{spawn_registration, NoopRegistrar, ServiceRegistration};

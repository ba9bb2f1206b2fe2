use std::net::SocketAddr;
use std::time::Duration;

use crate::utils::RetryConfig;

// ============================================================================
// Service Configuration
// ============================================================================
//
// Settings loaded from environment variables, with defaults that match a
// local deployment next to `food-catalog-service`.
//
// ============================================================================

const DEFAULT_BIND: &str = "0.0.0.0:8081";
const DEFAULT_SERVICE_NAME: &str = "order-service";
const DEFAULT_CATALOG_SERVICE: &str = "food-catalog-service";
const DEFAULT_REGISTRY: &str = "food-catalog-service=http://food-catalog-service:8080";

/// How peer service names are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorSettings {
    /// Fixed `name -> address` table.
    Static { entries: Vec<(String, String)> },
    /// Service names are host names resolved through platform DNS.
    Dns { scheme: String, port: u16 },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind: SocketAddr,
    /// Name this service registers itself under.
    pub service_name: String,
    /// Address peers should use to reach us; the bind address may be a
    /// wildcard such as `0.0.0.0`.
    pub advertise_address: String,
    /// Logical name of the catalog dependency.
    pub catalog_service: String,
    pub locator: LocatorSettings,
    /// Upper bound on a single name resolution.
    pub resolve_timeout: Duration,
    pub registration_retry: RetryConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {key} has invalid value {value:?}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind: SocketAddr = parse_var(&lookup, "ORDER_SERVICE_BIND", DEFAULT_BIND)?;
        let service_name = non_empty(&lookup, "ORDER_SERVICE_NAME", DEFAULT_SERVICE_NAME)?;
        let advertise_address = non_empty(
            &lookup,
            "ORDER_SERVICE_ADVERTISE_ADDRESS",
            &format!("{}:{}", service_name, bind.port()),
        )?;
        let catalog_service = non_empty(&lookup, "CATALOG_SERVICE_NAME", DEFAULT_CATALOG_SERVICE)?;

        let locator_kind = lookup("SERVICE_LOCATOR").unwrap_or_else(|| "static".to_string());
        let locator = match locator_kind.trim().to_lowercase().as_str() {
            "static" => {
                let table = lookup("SERVICE_REGISTRY").unwrap_or_else(|| DEFAULT_REGISTRY.to_string());
                LocatorSettings::Static {
                    entries: parse_registry(&table)?,
                }
            }
            "dns" => LocatorSettings::Dns {
                scheme: non_empty(&lookup, "DNS_SERVICE_SCHEME", "http")?,
                port: parse_var(&lookup, "DNS_SERVICE_PORT", "8080")?,
            },
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "SERVICE_LOCATOR".to_string(),
                    value: locator_kind,
                    reason: "expected \"static\" or \"dns\"".to_string(),
                })
            }
        };

        let resolve_timeout_ms: u64 = parse_var(&lookup, "RESOLVE_TIMEOUT_MS", "2000")?;
        if resolve_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "RESOLVE_TIMEOUT_MS".to_string(),
                value: "0".to_string(),
                reason: "timeout must be positive".to_string(),
            });
        }

        let defaults = RetryConfig::default();
        let registration_retry = RetryConfig {
            max_attempts: parse_var(&lookup, "REGISTRATION_MAX_ATTEMPTS", "5")?,
            initial_delay: Duration::from_millis(parse_var(
                &lookup,
                "REGISTRATION_INITIAL_DELAY_MS",
                "500",
            )?),
            ..defaults
        };

        Ok(Self {
            bind,
            service_name,
            advertise_address,
            catalog_service,
            locator,
            resolve_timeout: Duration::from_millis(resolve_timeout_ms),
            registration_retry,
        })
    }
}

/// Parse `name=address` pairs separated by commas. Blank segments are
/// ignored so trailing commas are harmless.
fn parse_registry(table: &str) -> Result<Vec<(String, String)>, ConfigError> {
    table
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = |reason: &str| ConfigError::InvalidValue {
                key: "SERVICE_REGISTRY".to_string(),
                value: entry.to_string(),
                reason: reason.to_string(),
            };

            let (name, address) = entry
                .split_once('=')
                .ok_or_else(|| invalid("expected name=address"))?;
            let (name, address) = (name.trim(), address.trim());

            if name.is_empty() || address.is_empty() {
                return Err(invalid("name and address must both be set"));
            }
            Ok((name.to_string(), address.to_string()))
        })
        .collect()
}

fn parse_var<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn non_empty<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]).unwrap();

        assert_eq!(settings.bind, "0.0.0.0:8081".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.service_name, "order-service");
        assert_eq!(settings.advertise_address, "order-service:8081");
        assert_eq!(settings.catalog_service, "food-catalog-service");
        assert_eq!(settings.resolve_timeout, Duration::from_secs(2));
        assert_eq!(
            settings.locator,
            LocatorSettings::Static {
                entries: vec![(
                    "food-catalog-service".to_string(),
                    "http://food-catalog-service:8080".to_string()
                )]
            }
        );
        assert_eq!(settings.registration_retry.max_attempts, 5);
    }

    #[test]
    fn test_static_registry_table() {
        let settings = settings_from(&[(
            "SERVICE_REGISTRY",
            "food-catalog-service=http://10.0.0.5:8080, payment-service = http://pay:9000,",
        )])
        .unwrap();

        match settings.locator {
            LocatorSettings::Static { entries } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[1], ("payment-service".to_string(), "http://pay:9000".to_string()));
            }
            other => panic!("unexpected locator: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_registry_entry() {
        let err = settings_from(&[("SERVICE_REGISTRY", "food-catalog-service")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "SERVICE_REGISTRY"));
    }

    #[test]
    fn test_dns_locator() {
        let settings = settings_from(&[("SERVICE_LOCATOR", "DNS"), ("DNS_SERVICE_PORT", "9090")]).unwrap();
        assert_eq!(
            settings.locator,
            LocatorSettings::Dns {
                scheme: "http".to_string(),
                port: 9090
            }
        );
    }

    #[test]
    fn test_advertise_address() {
        let derived = settings_from(&[
            ("ORDER_SERVICE_NAME", "orders"),
            ("ORDER_SERVICE_BIND", "0.0.0.0:9100"),
        ])
        .unwrap();
        assert_eq!(derived.advertise_address, "orders:9100");

        let explicit = settings_from(&[("ORDER_SERVICE_ADVERTISE_ADDRESS", "10.1.2.3:8081")]).unwrap();
        assert_eq!(explicit.advertise_address, "10.1.2.3:8081");

        assert!(settings_from(&[("ORDER_SERVICE_ADVERTISE_ADDRESS", " ")]).is_err());
    }

    #[test]
    fn test_unknown_locator_kind() {
        assert!(settings_from(&[("SERVICE_LOCATOR", "consul")]).is_err());
    }

    #[test]
    fn test_invalid_numbers_and_addresses() {
        assert!(settings_from(&[("ORDER_SERVICE_BIND", "not-an-address")]).is_err());
        assert!(settings_from(&[("RESOLVE_TIMEOUT_MS", "soon")]).is_err());
        assert!(settings_from(&[("RESOLVE_TIMEOUT_MS", "0")]).is_err());
        assert!(settings_from(&[("DNS_SERVICE_PORT", "70000"), ("SERVICE_LOCATOR", "dns")]).is_err());
    }

    #[test]
    fn test_empty_catalog_name() {
        let err = settings_from(&[("CATALOG_SERVICE_NAME", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue(key) if key == "CATALOG_SERVICE_NAME"));
    }
}

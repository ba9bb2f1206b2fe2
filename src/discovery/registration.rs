use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::metrics::Metrics;
use crate::utils::{retry_on_transient, IsTransient, RetryConfig, RetryResult};

// ============================================================================
// Self-Registration
// ============================================================================
//
// Announces this service to an external registry in a background task.
// Registration is best effort: the task retries transient failures with
// backoff, logs the final outcome, and never propagates an error into
// startup or the request path.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRegistration {
    pub name: String,
    pub address: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),

    #[error("registration rejected: {0}")]
    Rejected(String),
}

impl IsTransient for RegistrationError {
    fn is_transient(&self) -> bool {
        matches!(self, RegistrationError::Unavailable(_))
    }
}

#[async_trait]
pub trait ServiceRegistrar: Send + Sync {
    async fn register(&self, registration: &ServiceRegistration) -> Result<(), RegistrationError>;
}

/// Used when no external registry is configured.
pub struct NoopRegistrar;

#[async_trait]
impl ServiceRegistrar for NoopRegistrar {
    async fn register(&self, registration: &ServiceRegistration) -> Result<(), RegistrationError> {
        tracing::info!(
            service = %registration.name,
            "Service registration skipped (no registry configured)"
        );
        Ok(())
    }
}

/// Spawn the registration task. The handle resolves to `true` once the
/// registry accepted us; callers are free to drop it.
pub fn spawn_registration(
    registrar: Arc<dyn ServiceRegistrar>,
    registration: ServiceRegistration,
    retry: RetryConfig,
    metrics: Arc<Metrics>,
) -> JoinHandle<bool> {
    tokio::spawn(async move {
        let result = retry_on_transient(retry, |attempt| {
            let registrar = registrar.clone();
            let registration = registration.clone();
            let metrics = metrics.clone();
            async move {
                let outcome = registrar.register(&registration).await;
                match &outcome {
                    Ok(()) => metrics.record_registration_attempt("ok"),
                    Err(e) => {
                        tracing::debug!(attempt = attempt, error = %e, "Registration attempt failed");
                        metrics.record_registration_attempt(if e.is_transient() {
                            "transient_error"
                        } else {
                            "rejected"
                        });
                    }
                }
                outcome
            }
        })
        .await;

        match result {
            RetryResult::Success(()) => {
                tracing::info!(
                    service = %registration.name,
                    address = %registration.address,
                    "Service registered"
                );
                true
            }
            RetryResult::Failed(e) | RetryResult::PermanentFailure(e) => {
                tracing::warn!(
                    service = %registration.name,
                    error = %e,
                    "Service registration abandoned; continuing without it"
                );
                false
            }
        }
    })
}

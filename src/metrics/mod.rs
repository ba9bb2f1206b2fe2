use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Order submissions and rejections (by reason)
// - Order status transitions
// - Peer service resolution (outcome and latency)
// - Self-registration attempts
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    // Order Metrics
    pub orders_submitted: IntCounter,
    pub orders_rejected: IntCounterVec,
    pub status_transitions: IntCounterVec,

    // Discovery Metrics
    pub service_resolutions: IntCounterVec,
    pub service_resolution_duration: HistogramVec,
    pub registration_attempts: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Order Metrics
        let orders_submitted = IntCounter::new(
            "orders_submitted_total",
            "Total orders accepted and stored",
        )?;
        registry.register(Box::new(orders_submitted.clone()))?;

        let orders_rejected = IntCounterVec::new(
            Opts::new("orders_rejected_total", "Total order submissions refused"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_rejected.clone()))?;

        let status_transitions = IntCounterVec::new(
            Opts::new("order_status_transitions_total", "Order status transitions applied"),
            &["from", "to"],
        )?;
        registry.register(Box::new(status_transitions.clone()))?;

        // Discovery Metrics
        let service_resolutions = IntCounterVec::new(
            Opts::new("service_resolutions_total", "Peer service name resolutions"),
            &["service", "outcome"],
        )?;
        registry.register(Box::new(service_resolutions.clone()))?;

        let service_resolution_duration = HistogramVec::new(
            HistogramOpts::new(
                "service_resolution_duration_seconds",
                "Time spent resolving peer service names",
            )
            .buckets(vec![0.0001, 0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["service"],
        )?;
        registry.register(Box::new(service_resolution_duration.clone()))?;

        let registration_attempts = IntCounterVec::new(
            Opts::new("registration_attempts_total", "Self-registration attempts"),
            &["outcome"],
        )?;
        registry.register(Box::new(registration_attempts.clone()))?;

        Ok(Self {
            registry,
            orders_submitted,
            orders_rejected,
            status_transitions,
            service_resolutions,
            service_resolution_duration,
            registration_attempts,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode every registered metric in the Prometheus text format
    pub fn render(&self) -> anyhow::Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }

    pub fn record_submission(&self) {
        self.orders_submitted.inc();
    }

    pub fn record_rejection(&self, reason: &str) {
        self.orders_rejected.with_label_values(&[reason]).inc();
    }

    pub fn record_transition(&self, from: &str, to: &str) {
        self.status_transitions.with_label_values(&[from, to]).inc();
    }

    pub fn record_resolution(&self, service: &str, outcome: &str, duration_secs: f64) {
        self.service_resolutions.with_label_values(&[service, outcome]).inc();
        self.service_resolution_duration
            .with_label_values(&[service])
            .observe(duration_secs);
    }

    pub fn record_registration_attempt(&self, outcome: &str) {
        self.registration_attempts.with_label_values(&[outcome]).inc();
    }
}

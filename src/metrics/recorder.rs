//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_int_counter_with_registry, CounterVec, Encoder, HistogramVec, IntCounter, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

/// Trait for recording board metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records a token verification attempt with its outcome.
    fn record_verification(&self, verifier_name: &str, result: &str);

    /// Records how long a token verification took.
    fn record_verification_duration(&self, verifier_name: &str, duration_secs: f64);

    /// Records whether the session gate let a request through.
    fn record_gate_outcome(&self, outcome: &str);

    /// Records a comment appended to the ledger.
    fn record_comment_posted(&self);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    verifications_total: CounterVec,
    verification_duration_seconds: HistogramVec,
    gate_outcomes_total: CounterVec,
    comments_posted_total: IntCounter,
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Arc::new(Registry::new());

        let verifications_total = register_counter_vec_with_registry!(
            Opts::new(
                "token_verifications_total",
                "Total number of token verification attempts"
            ),
            &["verifier", "result"],
            registry.clone()
        )?;

        let verification_duration_seconds = register_histogram_vec_with_registry!(
            "token_verification_duration_seconds",
            "Token verification duration in seconds",
            &["verifier"],
            vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
            registry.clone()
        )?;

        let gate_outcomes_total = register_counter_vec_with_registry!(
            Opts::new(
                "session_gate_outcomes_total",
                "Protected requests by session gate outcome"
            ),
            &["outcome"],
            registry.clone()
        )?;

        let comments_posted_total = register_int_counter_with_registry!(
            Opts::new("comments_posted_total", "Comments appended to the ledger"),
            registry.clone()
        )?;

        Ok(Metrics {
            registry,
            verifications_total,
            verification_duration_seconds,
            gate_outcomes_total,
            comments_posted_total,
        })
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("Failed to encode metrics: {}", e))?;
        String::from_utf8(buffer).map_err(|e| format!("Metrics are not UTF-8: {}", e))
    }
}

impl MetricsRecorder for Metrics {
    fn record_verification(&self, verifier_name: &str, result: &str) {
        self.verifications_total
            .with_label_values(&[verifier_name, result])
            .inc();
    }

    fn record_verification_duration(&self, verifier_name: &str, duration_secs: f64) {
        self.verification_duration_seconds
            .with_label_values(&[verifier_name])
            .observe(duration_secs);
    }

    fn record_gate_outcome(&self, outcome: &str) {
        self.gate_outcomes_total.with_label_values(&[outcome]).inc();
    }

    fn record_comment_posted(&self) {
        self.comments_posted_total.inc();
    }
}

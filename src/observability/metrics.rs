use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::domain::Decision;

/// Metrics registry for the evaluator.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Total evaluations performed
    pub evaluations_total: AtomicU64,

    /// Evaluations by decision
    pub decisions_auto_accepted: AtomicU64,
    pub decisions_auto_declined: AtomicU64,
    pub decisions_referred: AtomicU64,
    pub decisions_referred_fraud: AtomicU64,

    /// Evaluation latency buckets (microseconds)
    pub latency_under_10us: AtomicU64,
    pub latency_10_100us: AtomicU64,
    pub latency_100us_1ms: AtomicU64,
    pub latency_over_1ms: AtomicU64,

    /// Validator lookups
    pub validator_calls_total: AtomicU64,
    pub validator_failures_total: AtomicU64,

    /// Evaluations short-circuited by an expired license
    pub license_expired_total: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    /// Record a decision outcome.
    pub fn record_decision(&self, decision: Decision) {
        self.evaluations_total.fetch_add(1, Ordering::Relaxed);

        let counter = match decision {
            Decision::AutoAccepted => &self.decisions_auto_accepted,
            Decision::AutoDeclined => &self.decisions_auto_declined,
            Decision::ReferredToHuman => &self.decisions_referred,
            Decision::ReferredToHumanFraudRisk => &self.decisions_referred_fraud,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record evaluation latency.
    pub fn record_latency(&self, start: Instant) {
        let micros = start.elapsed().as_micros() as u64;

        if micros < 10 {
            self.latency_under_10us.fetch_add(1, Ordering::Relaxed);
        } else if micros < 100 {
            self.latency_10_100us.fetch_add(1, Ordering::Relaxed);
        } else if micros < 1000 {
            self.latency_100us_1ms.fetch_add(1, Ordering::Relaxed);
        } else {
            self.latency_over_1ms.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a validator lookup.
    pub fn record_validator_call(&self, success: bool) {
        self.validator_calls_total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.validator_failures_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_license_expired(&self) {
        self.license_expired_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP cardeval_evaluations_total Total number of application evaluations
# TYPE cardeval_evaluations_total counter
cardeval_evaluations_total {}

# HELP cardeval_decisions Evaluations by decision
# TYPE cardeval_decisions counter
cardeval_decisions{{decision="auto_accepted"}} {}
cardeval_decisions{{decision="auto_declined"}} {}
cardeval_decisions{{decision="referred_to_human"}} {}
cardeval_decisions{{decision="referred_to_human_fraud_risk"}} {}

# HELP cardeval_evaluation_latency_bucket Evaluation latency histogram
# TYPE cardeval_evaluation_latency_bucket counter
cardeval_evaluation_latency_bucket{{le="0.00001"}} {}
cardeval_evaluation_latency_bucket{{le="0.0001"}} {}
cardeval_evaluation_latency_bucket{{le="0.001"}} {}
cardeval_evaluation_latency_bucket{{le="+Inf"}} {}

# HELP cardeval_validator_calls_total Frequent flyer validator lookups
# TYPE cardeval_validator_calls_total counter
cardeval_validator_calls_total {}

# HELP cardeval_validator_failures_total Frequent flyer validator lookups that failed
# TYPE cardeval_validator_failures_total counter
cardeval_validator_failures_total {}

# HELP cardeval_license_expired_total Evaluations referred because the validator license expired
# TYPE cardeval_license_expired_total counter
cardeval_license_expired_total {}
"#,
            self.evaluations_total.load(Ordering::Relaxed),
            self.decisions_auto_accepted.load(Ordering::Relaxed),
            self.decisions_auto_declined.load(Ordering::Relaxed),
            self.decisions_referred.load(Ordering::Relaxed),
            self.decisions_referred_fraud.load(Ordering::Relaxed),
            self.latency_under_10us.load(Ordering::Relaxed),
            self.latency_10_100us.load(Ordering::Relaxed),
            self.latency_100us_1ms.load(Ordering::Relaxed),
            self.latency_over_1ms.load(Ordering::Relaxed),
            self.validator_calls_total.load(Ordering::Relaxed),
            self.validator_failures_total.load(Ordering::Relaxed),
            self.license_expired_total.load(Ordering::Relaxed),
        )
    }
}

/// Guard for timing operations.
pub struct TimingGuard<'a> {
    registry: &'a MetricsRegistry,
    start: Instant,
}

impl<'a> TimingGuard<'a> {
    pub fn new(registry: &'a MetricsRegistry) -> Self {
        TimingGuard {
            registry,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for TimingGuard<'a> {
    fn drop(&mut self) {
        self.registry.record_latency(self.start);
    }
}

use std::sync::Arc;
use thiserror::Error;

use crate::fraud::FraudLookup;
use crate::observability::MetricsRegistry;
use crate::validator::FrequentFlyerNumberValidator;

use super::Evaluator;

/// Errors raised while assembling an evaluator.
#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error("A frequent flyer number validator is required")]
    MissingNumberValidator,
}

/// Builder for [`Evaluator`].
///
/// The number validator is mandatory; the fraud lookup and metrics registry
/// are optional.
#[derive(Debug, Default)]
pub struct EvaluatorBuilder {
    number_validator: Option<Arc<dyn FrequentFlyerNumberValidator>>,
    fraud_lookup: Option<Arc<dyn FraudLookup>>,
    metrics: Option<Arc<MetricsRegistry>>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number_validator(mut self, validator: Arc<dyn FrequentFlyerNumberValidator>) -> Self {
        self.number_validator = Some(validator);
        self
    }

    pub fn fraud_lookup(mut self, lookup: Arc<dyn FraudLookup>) -> Self {
        self.fraud_lookup = Some(lookup);
        self
    }

    /// Set or clear the fraud lookup.
    pub fn maybe_fraud_lookup(mut self, lookup: Option<Arc<dyn FraudLookup>>) -> Self {
        self.fraud_lookup = lookup;
        self
    }

    pub fn metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the evaluator, failing fast when no validator was supplied.
    pub fn build(self) -> Result<Evaluator, EvaluatorError> {
        let validator = self
            .number_validator
            .ok_or(EvaluatorError::MissingNumberValidator)?;

        let mut evaluator = Evaluator::new(validator, self.fraud_lookup);
        evaluator.metrics = self.metrics;
        Ok(evaluator)
    }
}

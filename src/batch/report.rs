use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ApplicationId, CreditCardApplication, Decision, Reason, ValidationMode};
use crate::evaluator::Evaluator;

/// One line of batch output.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub application_id: ApplicationId,
    pub last_name: String,
    pub decision: Decision,
    pub reason: Reason,

    /// Mode the evaluator set for this application, if it got that far
    pub validation_mode: Option<ValidationMode>,

    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationReport {
    /// Evaluate one application and capture the result.
    pub fn evaluate(evaluator: &Evaluator, application: &CreditCardApplication) -> Self {
        let outcome = evaluator.assess(application);

        EvaluationReport {
            application_id: application.application_id.clone(),
            last_name: application.last_name.clone(),
            decision: outcome.decision,
            reason: outcome.reason,
            validation_mode: outcome
                .reason
                .sets_validation_mode()
                .then(|| evaluator.validator().validation_mode()),
            evaluated_at: Utc::now(),
        }
    }
}

/// Evaluate a batch in order.
pub fn evaluate_all(
    evaluator: &Evaluator,
    applications: &[CreditCardApplication],
) -> Vec<EvaluationReport> {
    applications
        .iter()
        .map(|app| EvaluationReport::evaluate(evaluator, app))
        .collect()
}

mod builder;

pub use builder::{EvaluatorBuilder, EvaluatorError};

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{CreditCardApplication, Decision, Outcome, Reason, ValidationMode};
use crate::fraud::FraudLookup;
use crate::observability::metrics::{MetricsRegistry, TimingGuard};
use crate::validator::FrequentFlyerNumberValidator;

/// Applicants at or below this age are always referred.
pub const AUTO_REFERRAL_MAX_AGE: u32 = 20;

/// Applicants at or above this age get a detailed number lookup.
pub const DETAILED_VALIDATION_MIN_AGE: u32 = 30;

/// Income at or above this is accepted outright.
pub const HIGH_INCOME_THRESHOLD: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Income below this is declined once every other check has passed.
pub const LOW_INCOME_THRESHOLD: Decimal = Decimal::from_parts(20_000, 0, 0, false, 0);

/// Credit-card application evaluator.
///
/// Applies a fixed sequence of rules; the first rule that matches decides.
/// The evaluator keeps no state between calls. It does write the
/// validation mode of the shared number validator, which callers holding
/// the same validator can read back.
#[derive(Debug)]
pub struct Evaluator {
    validator: Arc<dyn FrequentFlyerNumberValidator>,
    fraud_lookup: Option<Arc<dyn FraudLookup>>,
    metrics: Option<Arc<MetricsRegistry>>,
}

impl Evaluator {
    /// Create an evaluator around a validator and an optional fraud lookup.
    pub fn new(
        validator: Arc<dyn FrequentFlyerNumberValidator>,
        fraud_lookup: Option<Arc<dyn FraudLookup>>,
    ) -> Self {
        Evaluator {
            validator,
            fraud_lookup,
            metrics: None,
        }
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    /// The number validator this evaluator consults.
    pub fn validator(&self) -> &Arc<dyn FrequentFlyerNumberValidator> {
        &self.validator
    }

    pub fn has_fraud_lookup(&self) -> bool {
        self.fraud_lookup.is_some()
    }

    /// Decide an application.
    pub fn evaluate(&self, application: &CreditCardApplication) -> Decision {
        self.assess(application).decision
    }

    /// Decide an application and report which rule decided it.
    pub fn assess(&self, application: &CreditCardApplication) -> Outcome {
        let _timing = self.metrics.as_deref().map(TimingGuard::new);

        let outcome = self.apply_rules(application);

        if let Some(metrics) = &self.metrics {
            metrics.record_decision(outcome.decision);
        }

        debug!(
            application_id = %application.application_id,
            decision = %outcome.decision,
            reason = %outcome.reason,
            "Application evaluated"
        );

        outcome
    }

    fn apply_rules(&self, application: &CreditCardApplication) -> Outcome {
        // Fraud screening precedes everything, including the high-income fast path
        if let Some(lookup) = &self.fraud_lookup {
            if lookup.is_fraud_risk(application) {
                return Outcome::new(Decision::ReferredToHumanFraudRisk, Reason::FraudRisk);
            }
        }

        if application.gross_annual_income >= HIGH_INCOME_THRESHOLD {
            return Outcome::new(Decision::AutoAccepted, Reason::HighIncome);
        }

        if self.validator.service_information().license.is_expired() {
            if let Some(metrics) = &self.metrics {
                metrics.record_license_expired();
            }
            return Outcome::refer(Reason::LicenseExpired);
        }

        let mode = if application.age >= DETAILED_VALIDATION_MIN_AGE {
            ValidationMode::Detailed
        } else {
            ValidationMode::Quick
        };
        self.validator.set_validation_mode(mode);

        let lookup = self
            .validator
            .is_valid(application.frequent_flyer_number());

        if let Some(metrics) = &self.metrics {
            metrics.record_validator_call(lookup.is_ok());
        }

        let is_valid_number = match lookup {
            Ok(valid) => valid,
            Err(e) => {
                warn!(
                    application_id = %application.application_id,
                    error = %e,
                    "Frequent flyer validation failed, referring application"
                );
                return Outcome::refer(Reason::ValidatorFailure);
            }
        };

        if !is_valid_number {
            return Outcome::refer(Reason::InvalidFrequentFlyerNumber);
        }

        if application.age <= AUTO_REFERRAL_MAX_AGE {
            return Outcome::refer(Reason::YoungApplicant);
        }

        if application.gross_annual_income < LOW_INCOME_THRESHOLD {
            return Outcome::new(Decision::AutoDeclined, Reason::LowIncome);
        }

        Outcome::refer(Reason::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ServiceInformation;
    use crate::fraud::SurnameFraudLookup;
    use crate::observability::tracing::init_test_tracing;
    use crate::validator::{MockValidator, ValidatorError};
    use std::sync::atomic::Ordering;

    fn ok_validator() -> Arc<MockValidator> {
        Arc::new(MockValidator::new().with_license_key(Some("OK")))
    }

    fn evaluator_with(validator: &Arc<MockValidator>) -> Evaluator {
        Evaluator::new(validator.clone(), None)
    }

    fn application(income: i64, age: u32) -> CreditCardApplication {
        CreditCardApplication::new("Jones", Decimal::new(income, 0), age)
    }

    /// Fraud lookup that flags every application.
    #[derive(Debug)]
    struct FlagEverything;

    impl FraudLookup for FlagEverything {
        fn check_application(&self, _application: &CreditCardApplication) -> bool {
            true
        }
    }

    #[test]
    fn test_accept_high_income_applications() {
        init_test_tracing();
        let validator = ok_validator();
        let evaluator = evaluator_with(&validator);

        let decision = evaluator.evaluate(&application(100_000, 0));

        assert_eq!(decision, Decision::AutoAccepted);
        assert_eq!(validator.call_count(), 0);
    }

    #[test]
    fn test_high_income_ignores_age_and_number() {
        let validator = Arc::new(MockValidator::new().returning(false));
        let evaluator = evaluator_with(&validator);

        for age in [0, 18, 20, 45, 90] {
            let app = application(250_000, age).with_frequent_flyer_number("bogus");
            assert_eq!(evaluator.evaluate(&app), Decision::AutoAccepted);
        }
    }

    #[test]
    fn test_high_income_wins_over_expired_license() {
        let validator = Arc::new(MockValidator::new().with_license_key(Some("EXPIRED")));
        let evaluator = evaluator_with(&validator);

        assert_eq!(
            evaluator.evaluate(&application(100_000, 42)),
            Decision::AutoAccepted
        );
    }

    #[test]
    fn test_refer_young_applications() {
        let validator = ok_validator();
        let evaluator = evaluator_with(&validator);

        let outcome = evaluator.assess(&application(0, 19));

        assert_eq!(outcome.decision, Decision::ReferredToHuman);
        assert_eq!(outcome.reason, Reason::YoungApplicant);
    }

    #[test]
    fn test_age_boundary() {
        let validator = ok_validator();
        let evaluator = evaluator_with(&validator);

        assert_eq!(
            evaluator.assess(&application(19_999, 20)).reason,
            Reason::YoungApplicant
        );
        assert_eq!(
            evaluator.assess(&application(19_999, 21)).decision,
            Decision::AutoDeclined
        );
    }

    #[test]
    fn test_decline_low_income_applications() {
        let validator = Arc::new(MockValidator::new().matching(|n| ("a"..="z").contains(&n)));
        let evaluator = evaluator_with(&validator);

        let app = application(19_999, 42).with_frequent_flyer_number("s");
        let outcome = evaluator.assess(&app);

        assert_eq!(outcome.decision, Decision::AutoDeclined);
        assert_eq!(outcome.reason, Reason::LowIncome);
        assert!(validator.was_called_with("s"));
    }

    #[test]
    fn test_income_boundaries() {
        let validator = ok_validator();
        let evaluator = evaluator_with(&validator);

        assert_eq!(
            evaluator.assess(&application(20_000, 42)).reason,
            Reason::Fallback
        );
        assert_eq!(
            evaluator.evaluate(&application(99_999, 42)),
            Decision::ReferredToHuman
        );

        let almost = CreditCardApplication::new("Jones", Decimal::new(9_999_999, 2), 42);
        assert_eq!(evaluator.evaluate(&almost), Decision::ReferredToHuman);
    }

    #[test]
    fn test_refer_when_license_key_expired() {
        let validator = Arc::new(
            MockValidator::new()
                .with_license_key(Some("EXPIRED"))
                .with_validation_mode(ValidationMode::Detailed),
        );
        let evaluator = evaluator_with(&validator);

        let outcome = evaluator.assess(&application(0, 42));

        assert_eq!(outcome.decision, Decision::ReferredToHuman);
        assert_eq!(outcome.reason, Reason::LicenseExpired);
        // Short-circuits before the mode is written or the number is looked up
        assert_eq!(validator.call_count(), 0);
        assert_eq!(validator.validation_mode(), ValidationMode::Detailed);
    }

    #[test]
    fn test_absent_license_key_is_not_expired() {
        let validator = Arc::new(MockValidator::new().with_license_key(None));
        let evaluator = evaluator_with(&validator);

        assert_eq!(
            evaluator.evaluate(&application(19_999, 42)),
            Decision::AutoDeclined
        );

        validator.set_license_key(Some("expired"));
        assert_eq!(
            evaluator.evaluate(&application(19_999, 42)),
            Decision::AutoDeclined
        );
    }

    #[test]
    fn test_use_detailed_lookup_for_older_applications() {
        let validator = ok_validator();
        let evaluator = evaluator_with(&validator);

        evaluator.evaluate(&application(0, 30));

        assert_eq!(
            evaluator.validator().validation_mode(),
            ValidationMode::Detailed
        );
    }

    #[test]
    fn test_use_quick_lookup_for_younger_applications() {
        let validator = Arc::new(
            MockValidator::new()
                .with_license_key(Some("OK"))
                .with_validation_mode(ValidationMode::Detailed),
        );
        let evaluator = evaluator_with(&validator);

        evaluator.evaluate(&application(0, 25));
        assert_eq!(validator.validation_mode(), ValidationMode::Quick);

        evaluator.evaluate(&application(0, 29));
        assert_eq!(validator.validation_mode(), ValidationMode::Quick);
    }

    #[test]
    fn test_mode_is_set_even_when_number_is_invalid() {
        let validator = Arc::new(MockValidator::new().returning(false));
        let evaluator = evaluator_with(&validator);

        let outcome = evaluator.assess(&application(0, 64));

        assert_eq!(outcome.reason, Reason::InvalidFrequentFlyerNumber);
        assert_eq!(validator.validation_mode(), ValidationMode::Detailed);
    }

    #[test]
    fn test_validates_the_exact_number() {
        let validator = ok_validator();
        let evaluator = evaluator_with(&validator);

        let app = CreditCardApplication::default().with_frequent_flyer_number("q1");
        evaluator.evaluate(&app);

        assert!(!validator.was_called_with("q"));
        assert!(validator.was_called_with("q1"));
        assert_eq!(validator.call_count(), 1);
    }

    #[test]
    fn test_absent_number_is_passed_as_empty() {
        let validator = ok_validator();
        let evaluator = evaluator_with(&validator);

        evaluator.evaluate(&application(0, 42));

        assert_eq!(validator.calls(), vec![String::new()]);
    }

    #[test]
    fn test_refer_when_frequent_flyer_validation_error() {
        init_test_tracing();
        let validator = Arc::new(MockValidator::new().failing("Custom Exception"));
        let evaluator = evaluator_with(&validator);

        let outcome = evaluator.assess(&application(0, 42));

        assert_eq!(outcome.decision, Decision::ReferredToHuman);
        assert_eq!(outcome.reason, Reason::ValidatorFailure);
    }

    #[test]
    fn test_failure_after_successful_lookup_is_referred() {
        let validator = Arc::new(MockValidator::new().returning_sequence([true]));
        validator.push_failure("connection reset");
        let evaluator = evaluator_with(&validator);

        let app = application(19_999, 42);

        assert_eq!(evaluator.evaluate(&app), Decision::AutoDeclined);

        let second = evaluator.assess(&app);
        assert_eq!(second.decision, Decision::ReferredToHuman);
        assert_eq!(second.reason, Reason::ValidatorFailure);
        assert_eq!(validator.call_count(), 2);
    }

    /// Validator whose lookups fail with an opaque error.
    #[derive(Debug, Default)]
    struct OpaqueFailureValidator {
        mode: parking_lot::Mutex<ValidationMode>,
    }

    impl FrequentFlyerNumberValidator for OpaqueFailureValidator {
        fn is_valid(&self, _number: &str) -> Result<bool, ValidatorError> {
            Err(anyhow::anyhow!("socket closed").into())
        }

        fn service_information(&self) -> ServiceInformation {
            ServiceInformation::with_license_key(Some("OK".to_string()))
        }

        fn validation_mode(&self) -> ValidationMode {
            *self.mode.lock()
        }

        fn set_validation_mode(&self, mode: ValidationMode) {
            *self.mode.lock() = mode;
        }
    }

    #[test]
    fn test_opaque_validator_error_is_referred() {
        let evaluator = Evaluator::new(Arc::new(OpaqueFailureValidator::default()), None);

        let outcome = evaluator.assess(&application(19_999, 42));

        assert_eq!(outcome.decision, Decision::ReferredToHuman);
        assert_eq!(outcome.reason, Reason::ValidatorFailure);
        assert_eq!(
            evaluator.validator().validation_mode(),
            ValidationMode::Detailed
        );
    }

    #[test]
    fn test_validation_error_wins_over_young_and_low_income() {
        let validator = Arc::new(MockValidator::new().failing("timeout"));
        let evaluator = evaluator_with(&validator);

        for age in [18, 42] {
            let outcome = evaluator.assess(&application(5_000, age));
            assert_eq!(outcome.reason, Reason::ValidatorFailure);
        }
    }

    #[test]
    fn test_refer_invalid_frequent_flyer_applications_sequence() {
        let validator = Arc::new(MockValidator::new().returning_sequence([false, true]));
        let evaluator = evaluator_with(&validator);

        let app = application(0, 25);

        let first = evaluator.assess(&app);
        assert_eq!(first.decision, Decision::ReferredToHuman);
        assert_eq!(first.reason, Reason::InvalidFrequentFlyerNumber);

        let second = evaluator.evaluate(&app);
        assert_eq!(second, Decision::AutoDeclined);
    }

    #[test]
    fn test_refer_fraud_risk() {
        let validator = Arc::new(MockValidator::new().returning_sequence([false, true]));
        let evaluator = Evaluator::builder()
            .number_validator(validator.clone())
            .fraud_lookup(Arc::new(FlagEverything))
            .build()
            .unwrap();

        let outcome = evaluator.assess(&CreditCardApplication::default());

        assert_eq!(outcome.decision, Decision::ReferredToHumanFraudRisk);
        assert_eq!(outcome.reason, Reason::FraudRisk);
        assert_eq!(validator.call_count(), 0);
    }

    #[test]
    fn test_fraud_check_precedes_high_income() {
        let validator = ok_validator();
        let evaluator = Evaluator::builder()
            .number_validator(validator)
            .fraud_lookup(Arc::new(SurnameFraudLookup::default()))
            .build()
            .unwrap();

        let smith = CreditCardApplication::new("Smith", Decimal::new(500_000, 0), 50);
        assert_eq!(
            evaluator.evaluate(&smith),
            Decision::ReferredToHumanFraudRisk
        );

        let jones = CreditCardApplication::new("Jones", Decimal::new(500_000, 0), 50);
        assert_eq!(evaluator.evaluate(&jones), Decision::AutoAccepted);
    }

    #[test]
    fn test_stub_validator_with_ok_license() {
        let validator = Arc::new(
            MockValidator::new()
                .with_license_key(Some("OK"))
                .returning(true),
        );
        let evaluator = evaluator_with(&validator);

        assert_eq!(
            evaluator.evaluate(&application(0, 25)),
            Decision::AutoDeclined
        );
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let validator = ok_validator();
        let evaluator = Evaluator::new(
            validator.clone(),
            Some(Arc::new(SurnameFraudLookup::default())),
        );

        let apps = [
            application(150_000, 35),
            application(50_000, 19),
            application(10_000, 45),
            application(50_000, 45),
            CreditCardApplication::new("Smith", Decimal::new(10_000, 0), 45),
        ];

        for app in &apps {
            let before = app.clone();
            let first = evaluator.assess(app);
            let mode_after_first = validator.validation_mode();
            let second = evaluator.assess(app);

            assert_eq!(first, second);
            assert_eq!(validator.validation_mode(), mode_after_first);
            assert_eq!(app, &before);
        }
    }

    #[test]
    fn test_metrics_recorded() {
        let metrics = Arc::new(MetricsRegistry::new());
        let validator = Arc::new(MockValidator::new().failing("down"));
        let evaluator = Evaluator::builder()
            .number_validator(validator)
            .metrics(metrics.clone())
            .build()
            .unwrap();

        evaluator.evaluate(&application(0, 42));
        evaluator.evaluate(&application(120_000, 42));

        assert_eq!(metrics.evaluations_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.decisions_referred.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.decisions_auto_accepted.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.validator_calls_total.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.validator_failures_total.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_evaluator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Evaluator>();
    }
}

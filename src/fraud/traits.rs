use std::fmt::Debug;

use crate::domain::CreditCardApplication;

/// Fraud screening policy.
///
/// Implementors supply `check_application`; the evaluator calls
/// `is_fraud_risk`, which delegates to it unless overridden.
pub trait FraudLookup: Send + Sync + Debug {
    /// Policy hook deciding whether the application looks fraudulent.
    fn check_application(&self, application: &CreditCardApplication) -> bool;

    fn is_fraud_risk(&self, application: &CreditCardApplication) -> bool {
        self.check_application(application)
    }
}

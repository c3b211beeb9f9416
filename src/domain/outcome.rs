use serde::{Deserialize, Serialize};
use std::fmt;

use super::Decision;

/// The rule that produced a decision.
///
/// Several rules share the same [`Decision`]; the reason keeps them apart
/// for audit and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    /// The fraud lookup flagged the application
    FraudRisk,
    /// Income at or above the auto-accept threshold
    HighIncome,
    /// The validator's license has expired
    LicenseExpired,
    /// The validator failed while checking the number
    ValidatorFailure,
    /// The validator rejected the frequent-flyer number
    InvalidFrequentFlyerNumber,
    /// Applicant at or below the auto-referral age
    YoungApplicant,
    /// Income below the auto-decline threshold
    LowIncome,
    /// No earlier rule matched
    Fallback,
}

impl Reason {
    /// Returns true if the evaluator wrote the validator's mode before
    /// reaching this reason.
    #[inline]
    pub fn sets_validation_mode(&self) -> bool {
        !matches!(
            self,
            Reason::FraudRisk | Reason::HighIncome | Reason::LicenseExpired
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            Reason::FraudRisk => "FRAUD_RISK",
            Reason::HighIncome => "HIGH_INCOME",
            Reason::LicenseExpired => "LICENSE_EXPIRED",
            Reason::ValidatorFailure => "VALIDATOR_FAILURE",
            Reason::InvalidFrequentFlyerNumber => "INVALID_FREQUENT_FLYER_NUMBER",
            Reason::YoungApplicant => "YOUNG_APPLICANT",
            Reason::LowIncome => "LOW_INCOME",
            Reason::Fallback => "FALLBACK",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Decision together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub decision: Decision,
    pub reason: Reason,
}

impl Outcome {
    #[inline]
    pub fn new(decision: Decision, reason: Reason) -> Self {
        Outcome { decision, reason }
    }

    #[inline]
    pub fn refer(reason: Reason) -> Self {
        Outcome::new(Decision::ReferredToHuman, reason)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of evaluating a credit-card application.
///
/// Every evaluation produces exactly one of these; there is no "pending"
/// or "unknown" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Application approved without review
    AutoAccepted,
    /// Application declined without review
    AutoDeclined,
    /// Application needs a human underwriter
    ReferredToHuman,
    /// Application needs a human underwriter because it looks fraudulent
    ReferredToHumanFraudRisk,
}

impl Decision {
    /// Returns true if the decision was made without a human.
    #[inline]
    pub fn is_automatic(&self) -> bool {
        matches!(self, Decision::AutoAccepted | Decision::AutoDeclined)
    }

    /// Returns true if a human has to look at the application.
    #[inline]
    pub fn is_referral(&self) -> bool {
        !self.is_automatic()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::AutoAccepted => "AUTO_ACCEPTED",
            Decision::AutoDeclined => "AUTO_DECLINED",
            Decision::ReferredToHuman => "REFERRED_TO_HUMAN",
            Decision::ReferredToHumanFraudRisk => "REFERRED_TO_HUMAN_FRAUD_RISK",
        }
    }

    /// Parse from string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "AUTO_ACCEPTED" => Some(Decision::AutoAccepted),
            "AUTO_DECLINED" => Some(Decision::AutoDeclined),
            "REFERRED_TO_HUMAN" => Some(Decision::ReferredToHuman),
            "REFERRED_TO_HUMAN_FRAUD_RISK" => Some(Decision::ReferredToHumanFraudRisk),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

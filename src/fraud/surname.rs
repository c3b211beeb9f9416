use std::collections::HashSet;

use crate::domain::CreditCardApplication;

use super::traits::FraudLookup;

/// Surname flagged by the default lookup.
pub const DEFAULT_FLAGGED_SURNAME: &str = "Smith";

/// Flags applications whose last name is on a watch list.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct SurnameFraudLookup {
    flagged: HashSet<String>,
}

impl SurnameFraudLookup {
    pub fn new(flagged: impl IntoIterator<Item = String>) -> Self {
        SurnameFraudLookup {
            flagged: flagged.into_iter().collect(),
        }
    }

    pub fn flagged(&self) -> &HashSet<String> {
        &self.flagged
    }
}

impl Default for SurnameFraudLookup {
    fn default() -> Self {
        SurnameFraudLookup::new([DEFAULT_FLAGGED_SURNAME.to_string()])
    }
}

impl FraudLookup for SurnameFraudLookup {
    fn check_application(&self, application: &CreditCardApplication) -> bool {
        self.flagged.contains(&application.last_name)
    }
}

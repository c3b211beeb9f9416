use parking_lot::RwLock;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::domain::{ServiceInformation, ValidationMode};

use super::traits::{FrequentFlyerNumberValidator, ValidatorError};

/// Validator backed by a fixed list of accepted frequent-flyer numbers.
///
/// Numbers are compared trimmed and upper-cased. Both validation modes give
/// the same answer; detailed lookups are additionally logged.
#[derive(Debug)]
pub struct AllowListValidator {
    numbers: HashSet<String>,
    service_information: ServiceInformation,
    mode: RwLock<ValidationMode>,
}

impl AllowListValidator {
    /// Create a validator accepting the given numbers.
    pub fn new(numbers: impl IntoIterator<Item = String>, license_key: Option<String>) -> Self {
        let numbers = numbers
            .into_iter()
            .map(|n| normalize(&n))
            .filter(|n| !n.is_empty())
            .collect();

        AllowListValidator {
            numbers,
            service_information: ServiceInformation::with_license_key(license_key),
            mode: RwLock::new(ValidationMode::default()),
        }
    }

    /// Load accepted numbers from a text file.
    ///
    /// Expected format: one number per line, # for comments.
    pub fn from_file(
        path: impl AsRef<Path>,
        license_key: Option<String>,
    ) -> Result<Self, ValidatorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ValidatorError::Unavailable(format!("{}: {}", path.display(), e))
        })?;

        let numbers = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string);

        Ok(AllowListValidator::new(numbers, license_key))
    }

    /// Number of accepted frequent-flyer numbers.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

fn normalize(number: &str) -> String {
    number.trim().to_uppercase()
}

impl FrequentFlyerNumberValidator for AllowListValidator {
    fn is_valid(&self, frequent_flyer_number: &str) -> Result<bool, ValidatorError> {
        let normalized = normalize(frequent_flyer_number);
        if normalized.is_empty() {
            return Ok(false);
        }

        let valid = self.numbers.contains(&normalized);

        if self.validation_mode() == ValidationMode::Detailed {
            debug!(
                frequent_flyer_number = %normalized,
                valid,
                "Detailed frequent flyer lookup"
            );
        }

        Ok(valid)
    }

    fn service_information(&self) -> ServiceInformation {
        self.service_information.clone()
    }

    fn validation_mode(&self) -> ValidationMode {
        *self.mode.read()
    }

    fn set_validation_mode(&self, mode: ValidationMode) {
        *self.mode.write() = mode;
    }
}

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;

use crate::domain::{ServiceInformation, ValidationMode};

use super::traits::{FrequentFlyerNumberValidator, ValidatorError};

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Scripted answer for `is_valid`.
enum Behavior {
    Always(bool),
    /// Answers consumed one per call; `Ok(false)` once exhausted
    Sequence(VecDeque<Result<bool, String>>),
    Matching(Predicate),
    Failing(String),
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Always(valid) => f.debug_tuple("Always").field(valid).finish(),
            Behavior::Sequence(answers) => f.debug_tuple("Sequence").field(answers).finish(),
            Behavior::Matching(_) => f.write_str("Matching(..)"),
            Behavior::Failing(message) => f.debug_tuple("Failing").field(message).finish(),
        }
    }
}

/// Mock validator for testing.
///
/// Defaults to license key `OK` and accepting every number.
#[derive(Debug)]
pub struct MockValidator {
    license_key: Mutex<Option<String>>,
    behavior: Mutex<Behavior>,
    mode: Mutex<ValidationMode>,
    calls: Mutex<Vec<String>>,
}

impl MockValidator {
    pub fn new() -> Self {
        MockValidator {
            license_key: Mutex::new(Some("OK".to_string())),
            behavior: Mutex::new(Behavior::Always(true)),
            mode: Mutex::new(ValidationMode::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the license key reported through service information.
    pub fn with_license_key(self, key: Option<&str>) -> Self {
        *self.license_key.lock() = key.map(str::to_string);
        self
    }

    /// Answer every lookup with `valid`.
    pub fn returning(self, valid: bool) -> Self {
        *self.behavior.lock() = Behavior::Always(valid);
        self
    }

    /// Answer successive lookups from `answers`, in order.
    pub fn returning_sequence(self, answers: impl IntoIterator<Item = bool>) -> Self {
        *self.behavior.lock() = Behavior::Sequence(answers.into_iter().map(Ok).collect());
        self
    }

    /// Fail every lookup with a service error.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.behavior.lock() = Behavior::Failing(message.into());
        self
    }

    /// Accept exactly the numbers matching `predicate`.
    pub fn matching<F>(self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        *self.behavior.lock() = Behavior::Matching(Box::new(predicate));
        self
    }

    /// Preset the validation mode (for asserting it gets overwritten).
    pub fn with_validation_mode(self, mode: ValidationMode) -> Self {
        *self.mode.lock() = mode;
        self
    }

    /// Queue a failure as the next sequenced answer.
    pub fn push_failure(&self, message: impl Into<String>) {
        let mut behavior = self.behavior.lock();
        match &mut *behavior {
            Behavior::Sequence(answers) => answers.push_back(Err(message.into())),
            other => *other = Behavior::Sequence(VecDeque::from([Err(message.into())])),
        }
    }

    /// Change the license key after construction (for testing).
    pub fn set_license_key(&self, key: Option<&str>) {
        *self.license_key.lock() = key.map(str::to_string);
    }

    /// Numbers passed to `is_valid`, in call order (for assertions).
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn was_called_with(&self, number: &str) -> bool {
        self.calls.lock().iter().any(|n| n == number)
    }
}

impl Default for MockValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequentFlyerNumberValidator for MockValidator {
    fn is_valid(&self, frequent_flyer_number: &str) -> Result<bool, ValidatorError> {
        self.calls.lock().push(frequent_flyer_number.to_string());

        let mut behavior = self.behavior.lock();
        match &mut *behavior {
            Behavior::Always(valid) => Ok(*valid),
            Behavior::Sequence(answers) => match answers.pop_front() {
                Some(Ok(valid)) => Ok(valid),
                Some(Err(message)) => Err(ValidatorError::Service(message)),
                None => Ok(false),
            },
            Behavior::Matching(predicate) => Ok(predicate(frequent_flyer_number)),
            Behavior::Failing(message) => Err(ValidatorError::Service(message.clone())),
        }
    }

    fn service_information(&self) -> ServiceInformation {
        ServiceInformation::with_license_key(self.license_key.lock().clone())
    }

    fn validation_mode(&self) -> ValidationMode {
        *self.mode.lock()
    }

    fn set_validation_mode(&self, mode: ValidationMode) {
        *self.mode.lock() = mode;
    }
}

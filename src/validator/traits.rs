use std::fmt::Debug;
use thiserror::Error;

use crate::domain::{ServiceInformation, ValidationMode};

/// Errors a frequent-flyer number validator can raise.
///
/// The evaluator treats every variant the same way; the split only matters
/// for logs.
#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Validator unavailable: {0}")]
    Unavailable(String),

    #[error("Validator service error: {0}")]
    Service(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// External service that checks frequent-flyer numbers.
///
/// The validation mode is shared state: the evaluator writes it before each
/// lookup and callers holding the same handle can read it back afterwards,
/// so the setter takes `&self` and implementations keep the mode behind
/// interior mutability.
///
/// Implementations must report every failure as `Err` and never panic.
pub trait FrequentFlyerNumberValidator: Send + Sync + Debug {
    /// Check a frequent-flyer number.
    ///
    /// An absent number is passed as the empty string.
    fn is_valid(&self, frequent_flyer_number: &str) -> Result<bool, ValidatorError>;

    /// Service metadata, including the license.
    fn service_information(&self) -> ServiceInformation;

    /// Mode used for the next lookup.
    fn validation_mode(&self) -> ValidationMode;

    fn set_validation_mode(&self, mode: ValidationMode);
}

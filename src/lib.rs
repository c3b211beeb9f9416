pub mod batch;
pub mod config;
pub mod domain;
pub mod evaluator;
pub mod fraud;
pub mod observability;
pub mod validator;

pub use config::Config;
pub use domain::{CreditCardApplication, Decision, Outcome, Reason, ValidationMode};
pub use evaluator::{Evaluator, EvaluatorBuilder, EvaluatorError};
pub use fraud::FraudLookup;
pub use validator::{FrequentFlyerNumberValidator, ValidatorError};

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::CreditCardApplication;

/// Errors that can occur while loading an application batch.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Load applications from a YAML (or JSON) file holding a list.
pub fn load_applications(path: impl AsRef<Path>) -> Result<Vec<CreditCardApplication>, LoadError> {
    let content = fs::read_to_string(path)?;
    parse_applications(&content)
}

/// Parse applications from YAML (or JSON) text.
pub fn parse_applications(content: &str) -> Result<Vec<CreditCardApplication>, LoadError> {
    let applications: Vec<CreditCardApplication> = serde_yaml::from_str(content)?;

    validate_applications(&applications)?;

    Ok(applications)
}

fn validate_applications(applications: &[CreditCardApplication]) -> Result<(), LoadError> {
    let mut seen_ids = HashSet::new();

    for app in applications {
        if app.gross_annual_income < Decimal::ZERO {
            return Err(LoadError::Validation(format!(
                "Negative gross annual income for application {}",
                app.application_id
            )));
        }

        if !seen_ids.insert(&app.application_id) {
            return Err(LoadError::Validation(format!(
                "Duplicate application ID: {}",
                app.application_id
            )));
        }
    }

    Ok(())
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique application identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn new() -> Self {
        ApplicationId(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        ApplicationId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        ApplicationId::new()
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A credit-card application as submitted by the applicant.
///
/// The evaluator only ever borrows this; it is never modified during an
/// evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardApplication {
    /// Identifier used for logging and reporting
    #[serde(default)]
    pub application_id: ApplicationId,

    #[serde(default)]
    pub last_name: String,

    /// Gross annual income
    #[serde(default)]
    pub gross_annual_income: Decimal,

    #[serde(default)]
    pub age: u32,

    /// Loyalty-programme number, if the applicant gave one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequent_flyer_number: Option<String>,
}

impl CreditCardApplication {
    /// Create an application with a fresh id.
    pub fn new(last_name: impl Into<String>, gross_annual_income: Decimal, age: u32) -> Self {
        CreditCardApplication {
            application_id: ApplicationId::new(),
            last_name: last_name.into(),
            gross_annual_income,
            age,
            frequent_flyer_number: None,
        }
    }

    pub fn with_frequent_flyer_number(mut self, number: impl Into<String>) -> Self {
        self.frequent_flyer_number = Some(number.into());
        self
    }

    /// The frequent-flyer number as handed to a validator.
    ///
    /// An absent number is presented as the empty string.
    pub fn frequent_flyer_number(&self) -> &str {
        self.frequent_flyer_number.as_deref().unwrap_or("")
    }
}

impl Default for CreditCardApplication {
    fn default() -> Self {
        CreditCardApplication::new(String::new(), Decimal::ZERO, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_frequent_flyer_number_is_empty() {
        let app = CreditCardApplication::default();
        assert_eq!(app.frequent_flyer_number(), "");

        let app = app.with_frequent_flyer_number("Q1");
        assert_eq!(app.frequent_flyer_number(), "Q1");
    }

    #[test]
    fn test_application_deserialization() {
        let yaml = r#"
last_name: Jones
gross_annual_income: 19999
age: 42
frequent_flyer_number: "s"
"#;

        let app: CreditCardApplication = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(app.last_name, "Jones");
        assert_eq!(app.gross_annual_income, Decimal::new(19_999, 0));
        assert_eq!(app.age, 42);
        assert_eq!(app.frequent_flyer_number(), "s");
        // Id is generated when the input does not carry one
        assert!(!app.application_id.as_str().is_empty());
    }

    #[test]
    fn test_application_defaults() {
        let app: CreditCardApplication = serde_json::from_str(r#"{"age": 19}"#).unwrap();

        assert_eq!(app.age, 19);
        assert_eq!(app.gross_annual_income, Decimal::ZERO);
        assert!(app.frequent_flyer_number.is_none());
    }
}

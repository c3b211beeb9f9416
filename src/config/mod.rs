use std::path::PathBuf;

use clap::Parser;

use crate::fraud::DEFAULT_FLAGGED_SURNAME;

/// Batch evaluator configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "cardeval")]
#[command(about = "Evaluate credit-card applications against the decision rules")]
pub struct Config {
    /// Path to the applications file (YAML or JSON list)
    #[arg(
        long = "applications",
        default_value = "applications.yaml",
        env = "CARDEVAL_APPLICATIONS_PATH"
    )]
    pub applications_path: PathBuf,

    /// Path to the accepted frequent flyer numbers list
    #[arg(
        long = "frequent-flyer-list",
        default_value = "frequent_flyers.txt",
        env = "CARDEVAL_FREQUENT_FLYER_PATH"
    )]
    pub frequent_flyer_path: PathBuf,

    /// License key reported by the frequent flyer validator
    #[arg(long, env = "CARDEVAL_LICENSE_KEY")]
    pub license_key: Option<String>,

    /// Enable fraud screening before the other rules
    #[arg(long, default_value = "false", env = "CARDEVAL_FRAUD_SCREENING")]
    pub fraud_screening: bool,

    /// Last names flagged by fraud screening (repeatable or comma separated)
    #[arg(
        long = "flagged-surname",
        value_delimiter = ',',
        default_value = DEFAULT_FLAGGED_SURNAME,
        env = "CARDEVAL_FLAGGED_SURNAMES"
    )]
    pub flagged_surnames: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Print Prometheus metrics to stderr after the batch
    #[arg(long, default_value = "false", env = "CARDEVAL_PRINT_METRICS")]
    pub print_metrics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            applications_path: PathBuf::from("applications.yaml"),
            frequent_flyer_path: PathBuf::from("frequent_flyers.txt"),
            license_key: None,
            fraud_screening: false,
            flagged_surnames: vec![DEFAULT_FLAGGED_SURNAME.to_string()],
            log_level: "info".to_string(),
            print_metrics: false,
        }
    }
}

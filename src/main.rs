use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cardeval::batch::{evaluate_all, load_applications};
use cardeval::config::Config;
use cardeval::fraud::{FraudLookup, SurnameFraudLookup};
use cardeval::observability::{init_tracing, MetricsRegistry};
use cardeval::validator::AllowListValidator;
use cardeval::Evaluator;

fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting cardeval application evaluator"
    );

    let validator =
        AllowListValidator::from_file(&config.frequent_flyer_path, config.license_key.clone())?;
    info!(
        path = %config.frequent_flyer_path.display(),
        numbers = validator.len(),
        "Frequent flyer list loaded"
    );

    let fraud_lookup: Option<Arc<dyn FraudLookup>> = if config.fraud_screening {
        info!(surnames = ?config.flagged_surnames, "Fraud screening enabled");
        Some(Arc::new(SurnameFraudLookup::new(
            config.flagged_surnames.iter().cloned(),
        )))
    } else {
        info!("Fraud screening disabled");
        None
    };

    let metrics = Arc::new(MetricsRegistry::new());

    let evaluator = Evaluator::builder()
        .number_validator(Arc::new(validator))
        .maybe_fraud_lookup(fraud_lookup)
        .metrics(metrics.clone())
        .build()?;

    let applications = load_applications(&config.applications_path)?;
    info!(
        path = %config.applications_path.display(),
        count = applications.len(),
        "Applications loaded"
    );

    let reports = evaluate_all(&evaluator, &applications);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for report in &reports {
        serde_json::to_writer(&mut out, report)?;
        writeln!(out)?;
    }
    out.flush()?;

    info!(evaluated = reports.len(), "Batch complete");

    if config.print_metrics {
        eprint!("{}", metrics.to_prometheus());
    }

    Ok(())
}

//! Credit Scoring - Main Entry Point
//!
//! Loads the dataset, trains the classifier once, then collects customer
//! details interactively and reports the predicted credit-score category.

use anyhow::Result;
use credit_scoring::{
    config::AppConfig, form, gauge, models::scorer::ScoringEngine, state::SessionState,
};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("credit_scoring=info".parse()?),
        )
        .init();

    info!("Starting credit scoring session");

    // Load configuration
    let config = AppConfig::load_or_default()?;
    info!(
        dataset = %config.data.dataset_path,
        seed = config.training.seed,
        trees = config.training.ensemble_size,
        "Configuration loaded"
    );

    // Session-scoped caches: the dataset is read and the model trained once,
    // regardless of how many predictions follow.
    let state = SessionState::new();

    let dataset = state.dataset(&config)?;
    info!(
        rows = dataset.n_rows(),
        features = dataset.n_features(),
        occupations = dataset.occupations.len(),
        "Dataset ready"
    );

    state.model(&config)?;

    let engine = ScoringEngine::new(&state);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    print_banner(&mut output)?;

    run_session(&engine, &config, &mut input, &mut output)?;

    info!("Session ended");
    Ok(())
}

/// Collect, score and render until the user quits
fn run_session(
    engine: &ScoringEngine<'_>,
    config: &AppConfig,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    while let Some(profile) = form::read_profile(input, output)? {
        match engine.predict(&profile)? {
            Some(report) => {
                gauge::render(&report, &config.output.gauge_path)?;
                writeln!(output, "\n{}", report.message())?;
                writeln!(
                    output,
                    "Gauge chart written to {}\n",
                    config.output.gauge_path
                )?;
            }
            None => warn!("No trained model available; nothing to predict"),
        }
    }
    Ok(())
}

fn print_banner(output: &mut impl Write) -> Result<()> {
    writeln!(output, "\nỨng dụng dự đoán điểm tín dụng")?;
    writeln!(
        output,
        "Enter customer details to predict a credit score category. \
         Press Enter to accept a default, or 'q' to quit."
    )?;
    Ok(())
}

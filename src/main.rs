use clap::Parser;
use std::io::{self, Write};
use tracing::{error, info};

use venval::analyzer::projection::ProjectionEngine;
use venval::analyzer::{dcf, historical, multiples, synthesis};
use venval::config::{AppConfig, load_config};
use venval::dataset::{FinancialDataset, load_dataset};
use venval::model::{self, ValuationError};
use venval::report;

#[derive(Parser, Debug)]
#[command(
    name = "venval",
    about = "Startup valuation via DCF and market-comparable multiples"
)]
struct Cli {
    /// Analysis mode 1-6; prompts interactively when omitted
    mode: Option<u8>,
    /// Path to the JSON config file
    #[arg(short, long, default_value = "config.json")]
    config: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Historical,
    Projections,
    Dcf,
    Multiples,
    Complete,
    Quick,
}

impl Mode {
    fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Mode::Historical),
            2 => Some(Mode::Projections),
            3 => Some(Mode::Dcf),
            4 => Some(Mode::Multiples),
            5 => Some(Mode::Complete),
            6 => Some(Mode::Quick),
            _ => None,
        }
    }
}

fn prompt_for_mode() -> Result<Mode, ValuationError> {
    println!("\nChoose analysis to run:");
    println!("1. Historical Analysis Only");
    println!("2. Financial Projections Only");
    println!("3. DCF Analysis Only");
    println!("4. Market Multiples Only");
    println!("5. Complete Analysis");
    println!("6. Quick Summary");
    print!("\nEnter your choice (1-6): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    line.trim()
        .parse::<u8>()
        .ok()
        .and_then(Mode::from_choice)
        .ok_or_else(|| {
            ValuationError::Validation(format!(
                "invalid choice {:?}, expected 1-6",
                line.trim()
            ))
        })
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = resolve_mode(&cli).and_then(|mode| {
        let config = load_config(&cli.config)?;
        run(mode, &config)
    });
    if let Err(e) = result {
        error!("Analysis failed: {e}");
        std::process::exit(1);
    }
}

fn resolve_mode(cli: &Cli) -> Result<Mode, ValuationError> {
    match cli.mode {
        Some(choice) => Mode::from_choice(choice).ok_or_else(|| {
            ValuationError::Validation(format!("invalid mode {choice}, expected 1-6"))
        }),
        None => prompt_for_mode(),
    }
}

fn run(mode: Mode, config: &AppConfig) -> Result<(), ValuationError> {
    info!("Loading dataset...");
    let dataset = load_dataset(config)?;
    report::print_header();

    match mode {
        Mode::Historical => {
            let metrics = historical::analyze(&dataset.historical)?;
            report::print_historical(&dataset.historical, &metrics);
        }
        Mode::Projections => {
            let (_, projections) = project(config, &dataset)?;
            report::print_projections(&projections);
        }
        Mode::Dcf => {
            let (_, projections) = project(config, &dataset)?;
            let valuation = dcf::value(&projections, &dataset.parameters)?;
            let grid = dcf::sensitivity(&projections, &dataset.parameters);
            report::print_dcf(&valuation, &grid);
        }
        Mode::Multiples => {
            let (_, projections) = project(config, &dataset)?;
            let valuation = value_multiples(&dataset, &projections)?;
            report::print_multiples(&valuation);
        }
        Mode::Complete | Mode::Quick => {
            let (metrics, projections) = project(config, &dataset)?;
            let dcf_valuation = dcf::value(&projections, &dataset.parameters)?;
            let multiples_valuation = value_multiples(&dataset, &projections)?;
            let summary =
                synthesis::synthesize(&dcf_valuation, &multiples_valuation, &dataset.parameters)?;

            if mode == Mode::Complete {
                let grid = dcf::sensitivity(&projections, &dataset.parameters);
                report::print_historical(&dataset.historical, &metrics);
                report::print_projections(&projections);
                report::print_dcf(&dcf_valuation, &grid);
                report::print_multiples(&multiples_valuation);
                report::print_summary(&summary);
            } else {
                report::print_quick_summary(&summary);
            }
        }
    }

    info!("Analysis complete");
    Ok(())
}

/// Historical analysis feeds the projection stage; both are needed by
/// every mode past the first.
fn project(
    config: &AppConfig,
    dataset: &FinancialDataset,
) -> Result<(historical::HistoricalMetrics, Vec<model::ProjectionRow>), ValuationError> {
    let metrics = historical::analyze(&dataset.historical)?;
    info!(
        "Historical revenue CAGR: {:.1}%",
        metrics.revenue_cagr * 100.0
    );
    let engine = ProjectionEngine::new(config.projection.clone());
    let projections = engine.project(&dataset.historical, &dataset.parameters)?;
    Ok((metrics, projections))
}

fn value_multiples(
    dataset: &FinancialDataset,
    projections: &[model::ProjectionRow],
) -> Result<multiples::MultiplesValuation, ValuationError> {
    let current = dataset.historical.last().ok_or_else(|| {
        ValuationError::Validation("no historical data for current-year metrics".to_string())
    })?;
    let forward = projections.last().ok_or_else(|| {
        ValuationError::Validation("no projected data for forward metrics".to_string())
    })?;
    multiples::value(&dataset.comparables, current, forward)
}

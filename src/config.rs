use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::model::ValuationError;

/// Tunable projection assumptions. There is no canonical formula for the
/// taper endpoints or the margin target, so they live in config rather
/// than in code.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectionPolicy {
    /// Revenue growth applied in the first forecast year.
    pub initial_growth: f64,
    /// Revenue growth reached in the final forecast year; the path between
    /// the two endpoints is linear.
    pub long_run_growth: f64,
    /// EBITDA margin reached in the final forecast year, approached
    /// linearly from the last historical margin. Not clamped: a target
    /// below the starting margin yields a declining path.
    pub target_ebitda_margin: f64,
    /// Depreciation & amortization as a share of revenue.
    pub depreciation_pct: f64,
    /// Interest expense as a share of revenue.
    pub interest_pct: f64,
    /// Capital expenditure as a share of revenue.
    pub capex_pct: f64,
    /// Working-capital change as a share of revenue.
    pub working_capital_pct: f64,
}

impl Default for ProjectionPolicy {
    fn default() -> Self {
        Self {
            initial_growth: 0.35,
            long_run_growth: 0.15,
            target_ebitda_margin: 0.345,
            depreciation_pct: 0.025,
            interest_pct: 0.005,
            capex_pct: 0.03,
            working_capital_pct: 0.02,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub historical_path: String,
    pub comparables_path: String,
    pub parameters_path: String,
    pub projection: ProjectionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            historical_path: "data/startup_financials.csv".to_string(),
            comparables_path: "data/comparable_companies.csv".to_string(),
            parameters_path: "data/valuation_parameters.csv".to_string(),
            projection: ProjectionPolicy::default(),
        }
    }
}

/// Loads the app config from a JSON file. A missing file is not an error:
/// every field has a default, so the bundled sample scenario runs as-is.
pub fn load_config(path: &str) -> Result<AppConfig, ValuationError> {
    if !Path::new(path).exists() {
        info!("No config file at {}, using defaults", path);
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config("does-not-exist.json").unwrap();
        assert_eq!(cfg.historical_path, "data/startup_financials.csv");
        assert!((cfg.projection.initial_growth - 0.35).abs() < 1e-12);
    }

    #[test]
    fn partial_config_keeps_defaults_for_absent_fields() {
        let cfg: AppConfig =
            serde_json::from_str(r#"{"projection": {"target_ebitda_margin": 0.30}}"#).unwrap();
        assert!((cfg.projection.target_ebitda_margin - 0.30).abs() < 1e-12);
        assert!((cfg.projection.capex_pct - 0.03).abs() < 1e-12);
        assert_eq!(cfg.comparables_path, "data/comparable_companies.csv");
    }
}

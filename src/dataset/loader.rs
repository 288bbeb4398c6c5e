// CSV ingestion for the three input sheets.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::config::AppConfig;
use crate::model::{ComparableCompany, FinancialRecord, ValuationError, ValuationParameters};

/// Everything a valuation run needs, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct FinancialDataset {
    pub historical: Vec<FinancialRecord>,
    pub comparables: Vec<ComparableCompany>,
    pub parameters: ValuationParameters,
}

#[derive(Debug, Deserialize)]
struct ParameterRow {
    #[serde(rename = "Parameter")]
    name: String,
    #[serde(rename = "Value")]
    value: f64,
}

/// Loads and validates all three input files.
pub fn load_dataset(config: &AppConfig) -> Result<FinancialDataset, ValuationError> {
    let historical: Vec<FinancialRecord> = read_rows(&config.historical_path)?;
    let comparables: Vec<ComparableCompany> = read_rows(&config.comparables_path)?;
    let parameters = read_parameters(&config.parameters_path)?;

    validate_history(&historical)?;
    validate_comparables(&comparables)?;
    validate_parameters(&parameters)?;

    info!(
        "Loaded {} historical years, {} comparables",
        historical.len(),
        comparables.len()
    );
    Ok(FinancialDataset {
        historical,
        comparables,
        parameters,
    })
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &str) -> Result<Vec<T>, ValuationError> {
    if !Path::new(path).exists() {
        return Err(ValuationError::MissingData(format!(
            "required input file not found: {path}"
        )));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

fn read_parameters(path: &str) -> Result<ValuationParameters, ValuationError> {
    let rows: Vec<ParameterRow> = read_rows(path)?;
    let map: HashMap<String, f64> = rows.into_iter().map(|r| (r.name, r.value)).collect();
    let get = |key: &str| -> Result<f64, ValuationError> {
        map.get(key)
            .copied()
            .ok_or_else(|| ValuationError::MissingData(format!("required parameter absent: {key}")))
    };
    Ok(ValuationParameters {
        risk_free_rate: get("Risk_Free_Rate")?,
        equity_risk_premium: get("Equity_Risk_Premium")?,
        beta: get("Beta")?,
        cost_of_debt: get("Cost_Of_Debt")?,
        tax_rate: get("Tax_Rate")?,
        equity_weight: get("Equity_Weight")?,
        debt_weight: get("Debt_Weight")?,
        terminal_growth_rate: get("Terminal_Growth_Rate")?,
        dcf_weight: get("DCF_Weight")?,
        multiples_weight: get("Multiples_Weight")?,
    })
}

/// Historical years must be contiguous and strictly increasing, with
/// non-negative revenue throughout.
fn validate_history(history: &[FinancialRecord]) -> Result<(), ValuationError> {
    for pair in history.windows(2) {
        if pair[1].year != pair[0].year + 1 {
            return Err(ValuationError::Validation(format!(
                "historical years must be contiguous and increasing, got {} after {}",
                pair[1].year, pair[0].year
            )));
        }
    }
    for record in history {
        if record.revenue < 0.0 {
            return Err(ValuationError::Validation(format!(
                "revenue must be non-negative, got {} in {}",
                record.revenue, record.year
            )));
        }
    }
    Ok(())
}

fn validate_comparables(comparables: &[ComparableCompany]) -> Result<(), ValuationError> {
    for company in comparables {
        if company.revenue <= 0.0 {
            return Err(ValuationError::Validation(format!(
                "comparable {} has non-positive revenue",
                company.name
            )));
        }
        if company.enterprise_value < 0.0 {
            return Err(ValuationError::Validation(format!(
                "comparable {} has negative enterprise value",
                company.name
            )));
        }
    }
    Ok(())
}

fn validate_parameters(params: &ValuationParameters) -> Result<(), ValuationError> {
    if (params.equity_weight + params.debt_weight - 1.0).abs() > 1e-9 {
        return Err(ValuationError::Validation(
            "equity and debt weights must sum to 1".to_string(),
        ));
    }
    if (params.dcf_weight + params.multiples_weight - 1.0).abs() > 1e-9 {
        return Err(ValuationError::Validation(
            "DCF and multiples weights must sum to 1".to_string(),
        ));
    }
    Ok(())
}

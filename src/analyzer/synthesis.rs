use crate::analyzer::dcf::DcfValuation;
use crate::analyzer::multiples::MultiplesValuation;
use crate::model::{ValuationError, ValuationParameters};

/// The final recommendation: descriptive statistics over every multiples
/// estimate, the weighted blend with the DCF value, and the overall range.
#[derive(Debug, Clone)]
pub struct ValuationSummary {
    pub dcf_value: f64,
    pub multiples_mean: f64,
    pub multiples_median: f64,
    pub multiples_min: f64,
    pub multiples_max: f64,
    pub dcf_weight: f64,
    pub multiples_weight: f64,
    pub weighted_valuation: f64,
    pub range_low: f64,
    pub range_high: f64,
}

fn median_of(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Blends the DCF value and the multiples median with the configured
/// weights and reports the overall valuation range.
pub fn synthesize(
    dcf: &DcfValuation,
    multiples: &MultiplesValuation,
    params: &ValuationParameters,
) -> Result<ValuationSummary, ValuationError> {
    let values: Vec<f64> = multiples.estimates.iter().map(|e| e.value).collect();
    if values.is_empty() {
        return Err(ValuationError::Domain(
            "no multiples estimates to synthesize".to_string(),
        ));
    }

    let multiples_mean = values.iter().sum::<f64>() / values.len() as f64;
    let multiples_min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let multiples_max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let multiples_median = median_of(values);

    let weighted_valuation =
        dcf.equity_value * params.dcf_weight + multiples_median * params.multiples_weight;

    Ok(ValuationSummary {
        dcf_value: dcf.equity_value,
        multiples_mean,
        multiples_median,
        multiples_min,
        multiples_max,
        dcf_weight: params.dcf_weight,
        multiples_weight: params.multiples_weight,
        weighted_valuation,
        range_low: dcf.equity_value.min(multiples_min),
        range_high: dcf.equity_value.max(multiples_max),
    })
}

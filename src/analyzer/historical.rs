use crate::model::{FinancialRecord, ValuationError};

/// Growth and margin statistics over the historical years.
#[derive(Debug, Clone)]
pub struct HistoricalMetrics {
    /// Compound annual growth rate of revenue, first year to last.
    pub revenue_cagr: f64,
    /// Arithmetic mean of year-over-year revenue growth.
    pub avg_revenue_growth: f64,
    pub avg_ebitda_margin: f64,
    pub avg_gross_margin: f64,
}

/// Computes growth and margin statistics from the historical records.
/// Needs at least two years and a positive base-year revenue, otherwise
/// the CAGR is undefined.
pub fn analyze(history: &[FinancialRecord]) -> Result<HistoricalMetrics, ValuationError> {
    if history.len() < 2 {
        return Err(ValuationError::Validation(format!(
            "at least two years of history are required, got {}",
            history.len()
        )));
    }
    let first = &history[0];
    let last = &history[history.len() - 1];
    if first.revenue <= 0.0 {
        return Err(ValuationError::Validation(format!(
            "base-year ({}) revenue must be positive for CAGR",
            first.year
        )));
    }

    let periods = (history.len() - 1) as f64;
    let revenue_cagr = (last.revenue / first.revenue).powf(1.0 / periods) - 1.0;

    let growth: Vec<f64> = history
        .windows(2)
        .map(|pair| pair[1].revenue / pair[0].revenue - 1.0)
        .collect();
    let avg_revenue_growth = growth.iter().sum::<f64>() / growth.len() as f64;

    let count = history.len() as f64;
    let avg_ebitda_margin = history.iter().map(|r| r.ebitda_margin()).sum::<f64>() / count;
    let avg_gross_margin = history.iter().map(|r| r.gross_margin()).sum::<f64>() / count;

    Ok(HistoricalMetrics {
        revenue_cagr,
        avg_revenue_growth,
        avg_ebitda_margin,
        avg_gross_margin,
    })
}

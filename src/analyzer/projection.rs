use crate::config::ProjectionPolicy;
use crate::model::{FinancialRecord, ProjectionRow, ValuationError, ValuationParameters};

/// Explicit forecast horizon in years.
pub const PROJECTION_HORIZON: usize = 5;

/// Extrapolates a fixed-length forward statement series from the last
/// historical year and the configured policy.
pub struct ProjectionEngine {
    policy: ProjectionPolicy,
}

impl ProjectionEngine {
    pub fn new(policy: ProjectionPolicy) -> Self {
        Self { policy }
    }

    /// Revenue growth applied in forecast year `t` (1-based): a linear
    /// taper from the initial rate to the long-run rate.
    fn growth_rate(&self, t: usize) -> f64 {
        let p = &self.policy;
        let span = (PROJECTION_HORIZON - 1) as f64;
        p.initial_growth + (p.long_run_growth - p.initial_growth) * (t - 1) as f64 / span
    }

    /// EBITDA margin in forecast year `t`: linear path from the base margin
    /// toward the target. Not clamped; a target below the base yields a
    /// monotonic decreasing path.
    fn margin(&self, base_margin: f64, t: usize) -> f64 {
        base_margin
            + (self.policy.target_ebitda_margin - base_margin) * t as f64
                / PROJECTION_HORIZON as f64
    }

    pub fn project(
        &self,
        history: &[FinancialRecord],
        params: &ValuationParameters,
    ) -> Result<Vec<ProjectionRow>, ValuationError> {
        let base = history.last().ok_or_else(|| {
            ValuationError::Validation("cannot project without historical data".to_string())
        })?;
        if base.revenue <= 0.0 {
            return Err(ValuationError::Validation(format!(
                "final historical year ({}) revenue must be positive",
                base.year
            )));
        }
        let base_margin = base.ebitda_margin();
        let p = &self.policy;

        let mut rows = Vec::with_capacity(PROJECTION_HORIZON);
        let mut prev_revenue = base.revenue;
        for t in 1..=PROJECTION_HORIZON {
            let revenue = prev_revenue * (1.0 + self.growth_rate(t));
            let ebitda_margin = self.margin(base_margin, t);
            let ebitda = revenue * ebitda_margin;
            let depreciation = revenue * p.depreciation_pct;
            let ebit = ebitda - depreciation;
            let interest_expense = revenue * p.interest_pct;
            let ebt = ebit - interest_expense;
            let taxes = ebt * params.tax_rate;
            let net_income = ebt - taxes;
            let capex = revenue * p.capex_pct;
            let working_capital_change = revenue * p.working_capital_pct;
            let free_cash_flow = net_income + depreciation - capex - working_capital_change;

            rows.push(ProjectionRow {
                year: base.year + t as i32,
                revenue,
                ebitda,
                ebitda_margin,
                depreciation,
                ebit,
                interest_expense,
                net_income,
                capex,
                working_capital_change,
                free_cash_flow,
            });
            prev_revenue = revenue;
        }
        Ok(rows)
    }
}

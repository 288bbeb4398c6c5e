use crate::model::{ProjectionRow, ValuationError, ValuationParameters};

/// Present-value breakdown of the discounted cash flow analysis.
/// Amounts in dollars.
#[derive(Debug, Clone)]
pub struct DcfValuation {
    pub cost_of_equity: f64,
    pub wacc: f64,
    pub pv_fcf: f64,
    pub terminal_value: f64,
    pub pv_terminal_value: f64,
    pub enterprise_value: f64,
    /// Equal to enterprise value: no net-debt adjustment is modeled.
    pub equity_value: f64,
}

/// Equity value across a grid of WACC and terminal-growth assumptions.
/// Cells where WACC <= growth are None (terminal value undefined there).
#[derive(Debug, Clone)]
pub struct SensitivityGrid {
    pub wacc_steps: Vec<f64>,
    pub growth_steps: Vec<f64>,
    pub equity_values: Vec<Vec<Option<f64>>>,
}

/// CAPM: risk-free rate plus beta times the equity risk premium.
pub fn cost_of_equity(params: &ValuationParameters) -> f64 {
    params.risk_free_rate + params.beta * params.equity_risk_premium
}

/// Weighted-average cost of capital over the target capital structure,
/// with the debt leg tax-shielded.
pub fn wacc(params: &ValuationParameters) -> f64 {
    params.equity_weight * cost_of_equity(params)
        + params.debt_weight * params.cost_of_debt * (1.0 - params.tax_rate)
}

fn discounted_value(cash_flows: &[f64], rate: f64, terminal_growth: f64) -> Option<f64> {
    if rate <= terminal_growth {
        return None;
    }
    let pv: f64 = cash_flows
        .iter()
        .enumerate()
        .map(|(i, fcf)| fcf / (1.0 + rate).powi(i as i32 + 1))
        .sum();
    let last = cash_flows.last()?;
    let terminal = last * (1.0 + terminal_growth) / (rate - terminal_growth);
    Some(pv + terminal / (1.0 + rate).powi(cash_flows.len() as i32))
}

/// Discounts the projected free cash flows and a Gordon-growth terminal
/// value to present value. Fails when WACC does not exceed the terminal
/// growth rate.
pub fn value(
    projections: &[ProjectionRow],
    params: &ValuationParameters,
) -> Result<DcfValuation, ValuationError> {
    if projections.is_empty() {
        return Err(ValuationError::Validation(
            "DCF requires at least one projected year".to_string(),
        ));
    }
    let coe = cost_of_equity(params);
    let rate = wacc(params);
    let growth = params.terminal_growth_rate;
    if rate <= growth {
        return Err(ValuationError::Domain(format!(
            "WACC ({:.2}%) must exceed the terminal growth rate ({:.2}%)",
            rate * 100.0,
            growth * 100.0
        )));
    }

    let pv_fcf: f64 = projections
        .iter()
        .enumerate()
        .map(|(i, row)| row.free_cash_flow / (1.0 + rate).powi(i as i32 + 1))
        .sum();
    let final_fcf = projections[projections.len() - 1].free_cash_flow;
    let terminal_value = final_fcf * (1.0 + growth) / (rate - growth);
    let pv_terminal_value = terminal_value / (1.0 + rate).powi(projections.len() as i32);
    let enterprise_value = pv_fcf + pv_terminal_value;

    Ok(DcfValuation {
        cost_of_equity: coe,
        wacc: rate,
        pv_fcf,
        terminal_value,
        pv_terminal_value,
        enterprise_value,
        equity_value: enterprise_value,
    })
}

/// Re-prices the equity value over a WACC x terminal-growth grid around the
/// base assumptions: WACC -2%..+2.5% in 0.5% steps, growth -1%..+1.25% in
/// 0.25% steps.
pub fn sensitivity(projections: &[ProjectionRow], params: &ValuationParameters) -> SensitivityGrid {
    let base_wacc = wacc(params);
    let base_growth = params.terminal_growth_rate;
    let cash_flows: Vec<f64> = projections.iter().map(|r| r.free_cash_flow).collect();

    let wacc_steps: Vec<f64> = (0..10).map(|i| base_wacc - 0.02 + i as f64 * 0.005).collect();
    let growth_steps: Vec<f64> = (0..10)
        .map(|j| base_growth - 0.01 + j as f64 * 0.0025)
        .collect();

    let equity_values = wacc_steps
        .iter()
        .map(|&w| {
            growth_steps
                .iter()
                .map(|&g| discounted_value(&cash_flows, w, g))
                .collect()
        })
        .collect();

    SensitivityGrid {
        wacc_steps,
        growth_steps,
        equity_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ValuationParameters {
        ValuationParameters {
            risk_free_rate: 0.0375,
            equity_risk_premium: 0.06,
            beta: 1.5,
            cost_of_debt: 0.08,
            tax_rate: 0.25,
            equity_weight: 0.8,
            debt_weight: 0.2,
            terminal_growth_rate: 0.02,
            dcf_weight: 0.6,
            multiples_weight: 0.4,
        }
    }

    fn flat_projection(fcf: f64, years: usize) -> Vec<ProjectionRow> {
        (0..years)
            .map(|i| ProjectionRow {
                year: 2025 + i as i32,
                revenue: fcf * 10.0,
                ebitda: fcf * 2.0,
                ebitda_margin: 0.2,
                depreciation: 0.0,
                ebit: fcf * 2.0,
                interest_expense: 0.0,
                net_income: fcf,
                capex: 0.0,
                working_capital_change: 0.0,
                free_cash_flow: fcf,
            })
            .collect()
    }

    #[test]
    fn capm_and_wacc_match_hand_values() {
        let p = params();
        assert!((cost_of_equity(&p) - 0.1275).abs() < 1e-12);
        assert!((wacc(&p) - 0.114).abs() < 1e-12);
    }

    #[test]
    fn enterprise_value_rises_as_wacc_falls() {
        let rows = flat_projection(1e6, 5);
        let mut cheap = params();
        cheap.beta = 1.2; // lower beta, lower WACC
        let base = value(&rows, &params()).unwrap();
        let low_wacc = value(&rows, &cheap).unwrap();
        assert!(low_wacc.wacc < base.wacc);
        assert!(low_wacc.enterprise_value > base.enterprise_value);
    }

    #[test]
    fn enterprise_value_falls_as_terminal_growth_falls() {
        let rows = flat_projection(1e6, 5);
        let mut slower = params();
        slower.terminal_growth_rate = 0.01;
        let base = value(&rows, &params()).unwrap();
        let slow = value(&rows, &slower).unwrap();
        assert!(slow.enterprise_value < base.enterprise_value);
    }

    #[test]
    fn wacc_at_or_below_terminal_growth_is_a_domain_error() {
        let rows = flat_projection(1e6, 5);
        let mut degenerate = params();
        degenerate.terminal_growth_rate = 0.2;
        let err = value(&rows, &degenerate).unwrap_err();
        assert!(matches!(err, ValuationError::Domain(_)));
    }

    #[test]
    fn empty_projection_is_rejected() {
        assert!(value(&[], &params()).is_err());
    }

    #[test]
    fn perpetuity_of_one_dollar_checks_out() {
        // Single year, FCF 1.0: EV = 1/(1+w) + 1*(1+g)/(w-g)/(1+w)
        let rows = flat_projection(1.0, 1);
        let p = params();
        let got = value(&rows, &p).unwrap();
        let w = got.wacc;
        let g = p.terminal_growth_rate;
        let expected = 1.0 / (1.0 + w) + (1.0 + g) / (w - g) / (1.0 + w);
        assert!((got.enterprise_value - expected).abs() < 1e-12);
    }

    #[test]
    fn sensitivity_grid_masks_degenerate_cells_and_brackets_the_base() {
        let rows = flat_projection(1e6, 5);
        let p = params();
        let grid = sensitivity(&rows, &p);
        assert_eq!(grid.wacc_steps.len(), 10);
        assert_eq!(grid.growth_steps.len(), 10);
        let base = value(&rows, &p).unwrap();
        // Cell at the base assumptions (wacc index 4, growth index 4).
        let cell = grid.equity_values[4][4].unwrap();
        assert!((cell - base.equity_value).abs() < 1e-3);
        // Every populated cell must satisfy wacc > growth.
        for (i, row) in grid.equity_values.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                if cell.is_none() {
                    assert!(grid.wacc_steps[i] <= grid.growth_steps[j]);
                }
            }
        }
    }
}

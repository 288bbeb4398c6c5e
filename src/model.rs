// Core structs: FinancialRecord, ComparableCompany, ValuationParameters, ProjectionRow
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// One historical fiscal year of the subject company. Amounts in dollars.
#[derive(Debug, Clone, Deserialize)]
pub struct FinancialRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "COGS")]
    pub cogs: f64,
    #[serde(rename = "Operating_Expenses")]
    pub operating_expenses: f64,
    #[serde(rename = "EBITDA")]
    pub ebitda: f64,
    #[serde(rename = "Depreciation_Amortization")]
    pub depreciation: f64,
    #[serde(rename = "CapEx")]
    pub capex: f64,
    #[serde(rename = "Working_Capital_Change")]
    pub working_capital_change: f64,
}

impl FinancialRecord {
    pub fn ebitda_margin(&self) -> f64 {
        self.ebitda / self.revenue
    }

    pub fn gross_margin(&self) -> f64 {
        (self.revenue - self.cogs) / self.revenue
    }
}

/// Market segment of a comparable company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Segment {
    Public,
    Private,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Public => write!(f, "Public"),
            Segment::Private => write!(f, "Private"),
        }
    }
}

/// One comparable company. Enterprise value, revenue and EBITDA in $M;
/// the multiples are dimensionless so the unit never leaves this struct.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparableCompany {
    #[serde(rename = "Company")]
    pub name: String,
    #[serde(rename = "Stage")]
    pub segment: Segment,
    #[serde(rename = "Enterprise_Value")]
    pub enterprise_value: f64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "EBITDA")]
    pub ebitda: f64,
}

impl ComparableCompany {
    pub fn ev_revenue(&self) -> f64 {
        self.enterprise_value / self.revenue
    }

    /// None when EBITDA is zero or negative; such companies are excluded
    /// from the EV/EBITDA median.
    pub fn ev_ebitda(&self) -> Option<f64> {
        if self.ebitda > 0.0 {
            Some(self.enterprise_value / self.ebitda)
        } else {
            None
        }
    }
}

/// Rates and weights driving the DCF and the final synthesis.
/// Loaded from the Parameter,Value sheet.
#[derive(Debug, Clone)]
pub struct ValuationParameters {
    pub risk_free_rate: f64,
    pub equity_risk_premium: f64,
    pub beta: f64,
    pub cost_of_debt: f64,
    pub tax_rate: f64,
    pub equity_weight: f64,
    pub debt_weight: f64,
    pub terminal_growth_rate: f64,
    pub dcf_weight: f64,
    pub multiples_weight: f64,
}

/// One projected fiscal year. Amounts in dollars.
#[derive(Debug, Clone)]
pub struct ProjectionRow {
    pub year: i32,
    pub revenue: f64,
    pub ebitda: f64,
    pub ebitda_margin: f64,
    pub depreciation: f64,
    pub ebit: f64,
    pub interest_expense: f64,
    pub net_income: f64,
    pub capex: f64,
    pub working_capital_change: f64,
    pub free_cash_flow: f64,
}

#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("missing data: {0}")]
    MissingData(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("domain error: {0}")]
    Domain(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

// Analyzer module: the four valuation stages plus the weighted synthesis.

pub mod dcf;
pub mod historical;
pub mod multiples;
pub mod projection;
pub mod synthesis;

pub use dcf::DcfValuation;
pub use historical::HistoricalMetrics;
pub use multiples::MultiplesValuation;
pub use projection::ProjectionEngine;
pub use synthesis::ValuationSummary;

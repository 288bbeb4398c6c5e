// Dataset module: tabular input loading and validation.

pub mod loader;

pub use loader::{FinancialDataset, load_dataset};

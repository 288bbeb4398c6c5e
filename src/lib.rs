pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod model;
pub mod report;

//! ccsmoke Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP client, response evaluator, log source, reporter)
//! - The fixed probe catalog
//! - Use case orchestration (probe execution, suite run, log inspection)

pub mod catalog;
pub mod ports;
pub mod use_cases;

pub use ports::{
    HttpClient, HttpClientError, LogSource, LogSourceError, ProbeReporter, ResponseEvaluator,
};
pub use use_cases::{ExecuteProbe, InspectServerLog, RunSuite};

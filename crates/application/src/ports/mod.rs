//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod http_client;
mod log_source;
mod reporter;
mod response_evaluator;

pub use http_client::{HttpClient, HttpClientError};
pub use log_source::{LogSource, LogSourceError};
pub use reporter::ProbeReporter;
pub use response_evaluator::ResponseEvaluator;

//! ccsmoke Domain - Core types
//!
//! This crate defines the domain model for the ccsmoke smoke-test runner:
//! requests and responses, probes and their outcomes, assertions, the chat
//! completions wire format and the run settings.
//! All types here are pure Rust with no I/O dependencies.

pub mod advisory;
pub mod chat;
pub mod error;
pub mod probe;
pub mod request;
pub mod response;
pub mod settings;
pub mod testing;

pub use advisory::{AdvisoryReport, Finding, LogExpectation};
pub use error::{DomainError, DomainResult};
pub use probe::{Credential, Highlight, Probe, ProbeResult, RunSummary, TimeoutClass};
pub use settings::{RunSettings, SuiteSelection};

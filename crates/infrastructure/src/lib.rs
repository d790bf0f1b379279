//! ccsmoke Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod reporting;
pub mod testing;

pub use adapters::{FileLogSource, ReqwestHttpClient};
pub use reporting::ConsoleReporter;
pub use testing::TestRunner;

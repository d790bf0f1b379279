//! Human-readable run output.

mod console;

pub use console::ConsoleReporter;

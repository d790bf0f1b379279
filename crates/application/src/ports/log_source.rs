//! Server log source port.

use std::future::Future;
use std::path::PathBuf;

/// Error type for reading the server log.
#[derive(Debug, thiserror::Error)]
pub enum LogSourceError {
    /// Log file not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Log file exists but is not valid UTF-8 text.
    #[error("Log is not valid UTF-8: {0}")]
    NotText(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of the server's log text for the advisory check.
pub trait LogSource: Send + Sync {
    /// Human-readable location, used in messages.
    fn location(&self) -> String;

    /// Reads the entire log.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read.
    fn read(&self) -> impl Future<Output = Result<String, LogSourceError>> + Send;
}

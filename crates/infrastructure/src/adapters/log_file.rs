//! Server log file source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ccsmoke_application::ports::{LogSource, LogSourceError};
use tokio::fs;

/// Reads the server log from a local file using `tokio::fs`.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    /// Creates a source for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FileLogSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> Result<String, LogSourceError> {
        fs::read_to_string(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => LogSourceError::NotFound(self.path.clone()),
            ErrorKind::InvalidData => LogSourceError::NotText(self.path.clone()),
            _ => LogSourceError::Io(e),
        })
    }
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("results directory not found: {}", .0.display())]
    MissingResultsDir(PathBuf),
    #[error("report not found: {}", .0.display())]
    MissingReport(PathBuf),
    #[error("malformed report: {0}")]
    MalformedReport(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(String),
}

impl BenchError {
    pub fn malformed<T: Into<String>>(msg: T) -> Self {
        BenchError::MalformedReport(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        BenchError::InvalidInput(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        BenchError::Io(msg.into())
    }

    /// Missing inputs abort the whole analysis; everything else is scoped
    /// to the section that raised it.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            BenchError::MissingResultsDir(_) | BenchError::MissingReport(_)
        )
    }
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::Io(err.to_string())
    }
}

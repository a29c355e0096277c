use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the domain, service, and storage layers.
#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("No entry recorded for {0}")]
    EntryNotFound(String),
    #[error("Receipt not found: {0}")]
    ReceiptNotFound(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Import rejected: {0}")]
    Import(String),
    #[error("Report generation failed: {0}")]
    Report(String),
}

pub type Result<T> = StdResult<T, RegisterError>;

impl From<std::io::Error> for RegisterError {
    fn from(err: std::io::Error) -> Self {
        RegisterError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RegisterError {
    fn from(err: serde_json::Error) -> Self {
        RegisterError::Storage(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] RegisterError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

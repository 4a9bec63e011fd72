//! CLI error types

use biocredit_ledger::LedgerError;
use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid amount: {0} (transfers must move between 1 and {max} seconds)", max = u64::MAX)]
    InvalidAmount(i128),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("{failed} of {total} shell commands were rejected")]
    Rejected { failed: usize, total: usize },
}

impl CliError {
    /// Process exit code. Rejections get distinct codes so scripts can branch.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Ledger(err) => match err {
                LedgerError::DuplicateIdentity(_) => 3,
                LedgerError::UnknownIdentity(_) => 4,
                LedgerError::InsufficientBalance { .. } => 5,
                LedgerError::InvalidAmount(_) => 6,
                LedgerError::SelfTransfer(_) => 7,
                LedgerError::EmptySample => 8,
                _ => 1,
            },
            CliError::InvalidAmount(_) => 6,
            CliError::Config(_) | CliError::InvalidArgument(_) => 2,
            _ => 1,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

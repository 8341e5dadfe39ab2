use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Transaction fields that must be supplied on create and edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    Type,
    Category,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Amount => "amount",
            Field::Type => "type",
            Field::Category => "category",
        };
        f.write_str(name)
    }
}

/// Rejected user input. Raised before any mutation takes place.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(Field),
    #[error("invalid amount `{0}`: expected a finite, non-zero number")]
    InvalidAmount(String),
    #[error("amount `{amount}` is too large (at most {max})")]
    AmountTooLarge { amount: String, max: String },
}

/// Failures reading or writing the persisted ledger file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read `{}`: {}", .path.display(), .source)]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write `{}`: {}", .path.display(), .source)]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed ledger data in `{}`: {}", .path.display(), .source)]
    MalformedData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub fn path(&self) -> &PathBuf {
        match self {
            StorageError::ReadFailure { path, .. }
            | StorageError::WriteFailure { path, .. }
            | StorageError::MalformedData { path, .. } => path,
        }
    }
}

/// Unified error type returned by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("transaction not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

pub mod json_backend;

use std::path::Path;

use crate::{errors::StorageError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over persistence backends capable of storing a whole ledger.
pub trait StorageBackend: Send + Sync {
    /// Reads the persisted ledger. A missing file yields an empty ledger.
    fn load(&self) -> Result<Ledger>;

    /// Overwrites the persisted ledger with `ledger`.
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Location of the persisted data, for display and diagnostics.
    fn location(&self) -> &Path;
}

pub use json_backend::{load_ledger_from_path, save_ledger_to_path, JsonStorage};

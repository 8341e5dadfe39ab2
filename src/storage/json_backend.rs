use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::StorageError,
    ledger::Ledger,
};

use super::{Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// Stores the ledger as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage for `finance_data.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(PathResolver::data_file_in(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Ledger> {
        load_ledger_from_path(&self.path)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        save_ledger_to_path(ledger, &self.path)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Loads a ledger from `path`, treating a missing file as an empty ledger.
pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no ledger file yet, starting empty");
            return Ok(Ledger::new());
        }
        Err(source) => {
            return Err(StorageError::ReadFailure {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let ledger: Ledger =
        serde_json::from_slice(&bytes).map_err(|source| StorageError::MalformedData {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), count = ledger.len(), "ledger loaded");
    Ok(ledger)
}

/// Writes the ledger to disk atomically by staging to a temporary file.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    let write_failure = |source: io::Error| StorageError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        ensure_dir(parent).map_err(write_failure)?;
    }
    let json = serde_json::to_string_pretty(ledger).map_err(|err| write_failure(err.into()))?;
    let tmp = tmp_path(path);
    if let Err(err) = write_atomic(&tmp, &json) {
        warn!(path = %tmp.display(), error = %err, "failed to stage ledger file");
        let _ = fs::remove_file(&tmp);
        return Err(write_failure(err));
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_failure(err));
    }
    debug!(path = %path.display(), count = ledger.len(), "ledger saved");
    Ok(())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()
}

use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".finance_ledger";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "FINANCE_LEDGER_HOME";

pub const DATA_FILE: &str = "finance_data.json";

/// Resolves the on-disk locations used by the application.
pub struct PathResolver;

impl PathResolver {
    /// Application data directory: `$FINANCE_LEDGER_HOME`, else `~/.finance_ledger`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn data_file_in(base: &Path) -> PathBuf {
        base.join(DATA_FILE)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn files_live_under_base() {
        let base = PathBuf::from("/srv/ledger");
        assert_eq!(
            PathResolver::data_file_in(&base),
            PathBuf::from("/srv/ledger/finance_data.json")
        );
        assert_eq!(
            PathResolver::config_file_in(&base),
            PathBuf::from("/srv/ledger/config.json")
        );
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(Path::new("")).unwrap();
    }
}

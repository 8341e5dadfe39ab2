#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use finance_ledger::{core::time::Clock, storage::JsonStorage, LedgerStore};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

/// Clock that advances by `step` on every reading.
pub struct StepClock {
    next: Mutex<NaiveDateTime>,
    step: Duration,
}

impl StepClock {
    pub fn new(start: NaiveDateTime, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> NaiveDateTime {
        let mut next = self.next.lock().expect("lock clock");
        let current = *next;
        *next = current + self.step;
        current
    }
}

/// Opens a store over `<base>/finance_data.json` whose clock ticks one minute per transaction.
pub fn open_store(base: &Path) -> LedgerStore {
    open_store_with_clock(base, Arc::new(StepClock::new(start_time(), Duration::minutes(1))))
}

pub fn open_store_with_clock(base: &Path, clock: Arc<dyn Clock>) -> LedgerStore {
    LedgerStore::with_clock(Box::new(JsonStorage::in_dir(base)), clock).expect("open store")
}

/// Isolated store backed by a unique directory.
pub fn setup_test_store() -> (LedgerStore, PathBuf) {
    let base = temp_base();
    (open_store(&base), base)
}

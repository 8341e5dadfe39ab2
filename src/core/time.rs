use chrono::{Local, NaiveDateTime};

use crate::ledger::Timestamp;

/// Clock abstracts access to the current time so the store stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current time truncated to the persisted timestamp resolution.
    fn timestamp(&self) -> Timestamp {
        Timestamp::new(self.now())
    }
}

/// Real-time clock backed by the system local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

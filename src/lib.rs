#![doc(test(attr(deny(warnings))))]

//! Finance Ledger records income and expense transactions in a JSON-backed
//! ledger and derives the views a front end needs to chart them: expense
//! totals per category and the running balance over time.
//!
//! The core ([`core::LedgerStore`], [`core::services::SummaryService`]) never
//! prints or formats for display; the bundled [`cli`] is one front end over it.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::LedgerStore;
pub use errors::{LedgerError, Result, StorageError, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance ledger tracing initialized.");
    });
}

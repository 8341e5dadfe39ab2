use std::{path::Path, sync::Arc};

use tracing::{debug, info, warn};

use crate::core::services::{
    BalancePoint, CategoryBreakdown, SummaryService, Totals, TransactionInput, TransactionService,
};
use crate::core::time::{Clock, SystemClock};
use crate::errors::Result;
use crate::ledger::{Ledger, Transaction, TransactionKind, TransactionRef};
use crate::storage::StorageBackend;

/// Single source of truth for transactions during a session.
///
/// Every successful mutation is followed by a full rewrite of the backing
/// storage. Validation happens before anything changes, so rejected input
/// leaves both memory and disk as they were.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
}

impl LedgerStore {
    /// Loads the persisted ledger using the system clock for new timestamps.
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self> {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn StorageBackend>, clock: Arc<dyn Clock>) -> Result<Self> {
        let ledger = storage.load()?;
        info!(
            path = %storage.location().display(),
            count = ledger.len(),
            "ledger opened"
        );
        Ok(Self {
            ledger,
            storage,
            clock,
        })
    }

    /// Re-reads the backing file, replacing the in-memory ledger.
    ///
    /// On failure the current ledger is kept unchanged.
    pub fn reload(&mut self) -> Result<usize> {
        self.ledger = self.storage.load()?;
        Ok(self.ledger.len())
    }

    /// Writes the whole ledger to storage.
    pub fn save(&self) -> Result<()> {
        self.storage.save(&self.ledger).map_err(|err| {
            warn!(error = %err, "failed to persist ledger");
            err.into()
        })
    }

    /// Records a new transaction stamped with the current time.
    pub fn add(
        &mut self,
        raw_amount: &str,
        kind: Option<TransactionKind>,
        category: &str,
        currency: &str,
    ) -> Result<Transaction> {
        let input = TransactionInput::new(raw_amount, kind, category);
        let date = self.clock.timestamp();
        let txn = TransactionService::add(&mut self.ledger, input, currency, date)?;
        info!(id = %txn.id(), date = %txn.date(), kind = %txn.kind(), "transaction added");
        self.save()?;
        Ok(txn)
    }

    /// Changes amount, type and category of the first transaction matching `target`.
    pub fn edit(
        &mut self,
        target: &TransactionRef,
        raw_amount: &str,
        kind: Option<TransactionKind>,
        category: &str,
    ) -> Result<Transaction> {
        let input = TransactionInput::new(raw_amount, kind, category);
        let txn = TransactionService::update(&mut self.ledger, target, input)?;
        info!(id = %txn.id(), date = %txn.date(), "transaction edited");
        self.save()?;
        Ok(txn)
    }

    /// Removes the first transaction matching `target`.
    ///
    /// Returns `false` without touching storage when nothing matches.
    pub fn delete(&mut self, target: &TransactionRef) -> Result<bool> {
        match TransactionService::remove(&mut self.ledger, target) {
            Some(removed) => {
                info!(id = %removed.id(), date = %removed.date(), "transaction deleted");
                self.save()?;
                Ok(true)
            }
            None => {
                debug!(target = %target, "delete target not present");
                Ok(false)
            }
        }
    }

    /// Transactions in insertion order, oldest first.
    pub fn list(&self) -> &[Transaction] {
        TransactionService::list(&self.ledger)
    }

    pub fn get(&self, target: &TransactionRef) -> Option<&Transaction> {
        self.ledger.find(target)
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn location(&self) -> &Path {
        self.storage.location()
    }

    pub fn expenses_by_category(&self) -> CategoryBreakdown {
        SummaryService::expenses_by_category(self.list())
    }

    pub fn balance_trend(&self) -> Vec<BalancePoint> {
        SummaryService::balance_trend(self.list())
    }

    pub fn totals(&self) -> Totals {
        SummaryService::totals(self.list())
    }
}

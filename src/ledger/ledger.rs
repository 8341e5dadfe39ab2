use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionRef};

/// Insertion-ordered sequence of transactions.
///
/// Serializes as a bare JSON array, the layout of `finance_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Index of the first transaction matching `target`.
    pub fn position(&self, target: &TransactionRef) -> Option<usize> {
        self.transactions.iter().position(|txn| target.matches(txn))
    }

    pub fn find(&self, target: &TransactionRef) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| target.matches(txn))
    }

    pub(crate) fn find_mut(&mut self, target: &TransactionRef) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| target.matches(txn))
    }

    pub(crate) fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub(crate) fn remove(&mut self, target: &TransactionRef) -> Option<Transaction> {
        let index = self.position(target)?;
        Some(self.transactions.remove(index))
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Timestamp, TransactionKind};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(second: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, second)
            .unwrap()
            .into()
    }

    #[test]
    fn date_lookup_returns_first_of_duplicates() {
        let first = Transaction::new(at(0), TransactionKind::Expense, dec!(5), "Coffee", "USD - $");
        let second = Transaction::new(at(0), TransactionKind::Expense, dec!(7), "Snacks", "USD - $");
        let ledger = Ledger::from_transactions(vec![first.clone(), second]);

        let found = ledger.find(&TransactionRef::Date(at(0))).unwrap();
        assert_eq!(found.id(), first.id());
        assert_eq!(ledger.position(&TransactionRef::Date(at(0))), Some(0));
    }

    #[test]
    fn remove_preserves_order_of_remaining_entries() {
        let a = Transaction::new(at(1), TransactionKind::Income, dec!(1), "A", "USD - $");
        let b = Transaction::new(at(2), TransactionKind::Income, dec!(2), "B", "USD - $");
        let c = Transaction::new(at(3), TransactionKind::Income, dec!(3), "C", "USD - $");
        let mut ledger = Ledger::from_transactions(vec![a.clone(), b.clone(), c.clone()]);

        let removed = ledger.remove(&TransactionRef::Id(b.id())).unwrap();
        assert_eq!(removed.id(), b.id());
        let remaining: Vec<_> = ledger.transactions().iter().map(|t| t.category()).collect();
        assert_eq!(remaining, vec!["A", "C"]);
    }

    #[test]
    fn serializes_as_a_plain_array() {
        let ledger = Ledger::new();
        assert_eq!(serde_json::to_string(&ledger).unwrap(), "[]");
    }
}

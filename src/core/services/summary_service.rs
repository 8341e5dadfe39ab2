use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::ledger::{Timestamp, Transaction};

/// Expense totals per category, as positive amounts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    totals: BTreeMap<String, Decimal>,
}

/// One slice of the expense breakdown with its share of all expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    /// Percentage of total expenses, rounded to one decimal place.
    pub percent: Decimal,
}

impl CategoryBreakdown {
    /// `true` when the ledger holds no expenses; there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.totals.get(category).copied()
    }

    /// Totals keyed by category in alphabetical order.
    pub fn totals(&self) -> &BTreeMap<String, Decimal> {
        &self.totals
    }

    /// Sum of all category totals, clamped to `Decimal`'s range.
    pub fn total(&self) -> Decimal {
        self.totals
            .values()
            .fold(Decimal::ZERO, |acc, total| acc.saturating_add(*total))
    }

    /// Categories ordered by descending total, ties broken alphabetically.
    pub fn ranked(&self) -> Vec<(&str, Decimal)> {
        let mut ranked: Vec<_> = self
            .totals
            .iter()
            .map(|(category, total)| (category.as_str(), *total))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn shares(&self) -> Vec<CategoryShare> {
        let grand_total = self.total();
        self.ranked()
            .into_iter()
            .map(|(category, total)| CategoryShare {
                category: category.to_string(),
                total,
                percent: percent_of(total, grand_total),
            })
            .collect()
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
        .round_dp(1)
}

/// Running balance after the transaction dated `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancePoint {
    pub date: Timestamp,
    pub balance: Decimal,
}

/// Income, expense and net figures across a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: Decimal,
    /// Sum of expense magnitudes (positive).
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Aggregations over stored transactions.
///
/// Sums saturate instead of overflowing, so hand-edited files with
/// oversized amounts still produce a report.
pub struct SummaryService;

impl SummaryService {
    /// Groups expenses by category and sums their magnitudes.
    pub fn expenses_by_category(transactions: &[Transaction]) -> CategoryBreakdown {
        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            let total = totals.entry(txn.category().to_string()).or_default();
            *total = total.saturating_add(txn.magnitude());
        }
        CategoryBreakdown { totals }
    }

    /// Cumulative balance in chronological order.
    ///
    /// Transactions sharing a timestamp keep their ledger order.
    pub fn balance_trend(transactions: &[Transaction]) -> Vec<BalancePoint> {
        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|txn| txn.date());

        let mut balance = Decimal::ZERO;
        ordered
            .into_iter()
            .map(|txn| {
                balance = balance.saturating_add(txn.amount());
                BalancePoint {
                    date: txn.date(),
                    balance,
                }
            })
            .collect()
    }

    pub fn totals(transactions: &[Transaction]) -> Totals {
        transactions.iter().fold(Totals::default(), |mut acc, txn| {
            if txn.is_expense() {
                acc.expenses = acc.expenses.saturating_add(txn.magnitude());
            } else {
                acc.income = acc.income.saturating_add(txn.amount());
            }
            acc.balance = acc.balance.saturating_add(txn.amount());
            acc
        })
    }
}

//! Text rendering for ledger data: amounts, tables, summaries.

use colored::Colorize;
use rust_decimal::Decimal;

use crate::core::services::{BalancePoint, CategoryBreakdown, Totals};
use crate::currency;
use crate::ledger::Transaction;

const SHORT_ID_LEN: usize = 8;

/// Magnitude with two decimals and the label's symbol, e.g. `200.00 $`.
pub fn format_amount(amount: Decimal, currency_label: &str) -> String {
    format!(
        "{:.2} {}",
        amount.abs().round_dp(2),
        currency::symbol(currency_label)
    )
}

/// Like [`format_amount`] but keeps a leading minus for negative values.
pub fn format_signed(amount: Decimal, currency_label: &str) -> String {
    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{}", format_amount(amount, currency_label))
}

pub fn short_id(transaction: &Transaction) -> String {
    let mut short = transaction.id().simple().to_string();
    short.truncate(SHORT_ID_LEN);
    short
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Fixed-width text table. Cells may carry ANSI styling through `paint`.
pub struct Table {
    headers: Vec<&'static str>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&'static str, Align)]) -> Self {
        Self {
            headers: columns.iter().map(|(header, _)| *header).collect(),
            align: columns.iter().map(|(_, align)| *align).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Renders the table; `paint` may style a padded cell given its row and column.
    pub fn render_with<F>(&self, paint: F) -> String
    where
        F: Fn(usize, usize, String) -> String,
    {
        let widths = self.widths();
        let pad = |text: &str, col: usize| {
            let fill = widths[col].saturating_sub(text.chars().count());
            match self.align[col] {
                Align::Left => format!("{text}{}", " ".repeat(fill)),
                Align::Right => format!("{}{text}", " ".repeat(fill)),
            }
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        let header: Vec<String> = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, text)| pad(text, col))
            .collect();
        lines.push(header.join("  ").bold().to_string());
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        lines.push(rule.join("  "));
        for (row_idx, row) in self.rows.iter().enumerate() {
            let cells: Vec<String> = (0..self.headers.len())
                .map(|col| {
                    let text = row.get(col).map(String::as_str).unwrap_or("");
                    paint(row_idx, col, pad(text, col))
                })
                .collect();
            lines.push(cells.join("  ").trim_end().to_string());
        }
        lines.join("\n")
    }

    pub fn render(&self) -> String {
        self.render_with(|_, _, cell| cell)
    }
}

/// Transactions table as shown by `list`: expenses red, income green.
pub fn transactions_table(transactions: &[Transaction]) -> String {
    const AMOUNT_COL: usize = 4;
    let mut table = Table::new(&[
        ("ID", Align::Left),
        ("Date", Align::Left),
        ("Type", Align::Left),
        ("Category", Align::Left),
        ("Amount", Align::Right),
    ]);
    for txn in transactions {
        table.push(vec![
            short_id(txn),
            txn.date().to_string(),
            txn.kind().to_string(),
            txn.category().to_string(),
            format_amount(txn.amount(), txn.currency()),
        ]);
    }
    table.render_with(|row, col, cell| {
        if col != AMOUNT_COL {
            return cell;
        }
        if transactions[row].is_expense() {
            cell.red().to_string()
        } else {
            cell.green().to_string()
        }
    })
}

pub fn breakdown_table(breakdown: &CategoryBreakdown, currency_label: &str) -> String {
    let mut table = Table::new(&[
        ("Category", Align::Left),
        ("Total", Align::Right),
        ("Share", Align::Right),
    ]);
    for share in breakdown.shares() {
        table.push(vec![
            share.category,
            format_amount(share.total, currency_label),
            format!("{:.1}%", share.percent),
        ]);
    }
    table.render()
}

pub fn trend_table(points: &[BalancePoint], currency_label: &str) -> String {
    let mut table = Table::new(&[("Date", Align::Left), ("Balance", Align::Right)]);
    for point in points {
        table.push(vec![
            point.date.to_string(),
            format_signed(point.balance, currency_label),
        ]);
    }
    table.render()
}

pub fn totals_lines(totals: &Totals, currency_label: &str) -> Vec<String> {
    vec![
        format!("Income  : {}", format_amount(totals.income, currency_label)),
        format!("Expenses: {}", format_amount(totals.expenses, currency_label)),
        format!("Balance : {}", format_signed(totals.balance, currency_label)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amounts_render_magnitude_and_symbol() {
        assert_eq!(format_amount(dec!(-200), "USD - $"), "200.00 $");
        assert_eq!(format_amount(dec!(3.456), "EUR - €"), "3.46 €");
        assert_eq!(format_signed(dec!(-70), "GBP - £"), "-70.00 £");
        assert_eq!(format_signed(dec!(70), "GBP - £"), "70.00 £");
    }

    #[test]
    fn table_pads_columns_to_widest_cell() {
        colored::control::set_override(false);
        let mut table = Table::new(&[("Name", Align::Left), ("Total", Align::Right)]);
        table.push(vec!["Groceries".into(), "200.00 $".into()]);
        table.push(vec!["Bus".into(), "5.00 $".into()]);
        let rendered = table.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "Name          Total");
        assert_eq!(lines[2], "Groceries  200.00 $");
        assert_eq!(lines[3], "Bus          5.00 $");
    }
}

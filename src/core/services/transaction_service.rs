//! Validation and in-memory mutation of ledger transactions.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::{Field, LedgerError, ValidationError};
use crate::ledger::{Ledger, Timestamp, Transaction, TransactionKind, TransactionRef};

use super::ServiceResult;

/// Field values as collected by a front end, before validation.
#[derive(Debug, Clone, Copy)]
pub struct TransactionInput<'a> {
    pub amount: &'a str,
    pub kind: Option<TransactionKind>,
    pub category: &'a str,
}

/// Input that passed validation: a positive magnitude and a trimmed category.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidInput {
    pub magnitude: Decimal,
    pub kind: TransactionKind,
    pub category: String,
}

impl<'a> TransactionInput<'a> {
    pub fn new(amount: &'a str, kind: Option<TransactionKind>, category: &'a str) -> Self {
        Self {
            amount,
            kind,
            category,
        }
    }

    /// Checks required fields first, then the amount.
    pub fn validate(&self) -> Result<ValidInput, ValidationError> {
        let kind = self.kind.ok_or(ValidationError::MissingField(Field::Type))?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingField(Field::Category));
        }
        let magnitude = parse_amount(self.amount)?;
        Ok(ValidInput {
            magnitude,
            kind,
            category: category.to_string(),
        })
    }
}

/// Largest magnitude a single transaction may carry (one quadrillion).
///
/// Keeps running totals far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Parses a user-entered amount into a positive magnitude.
///
/// Accepts plain and scientific decimal notation. Zero, empty, and anything
/// that is not a finite number are rejected, as are magnitudes above
/// [`MAX_AMOUNT`].
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(Field::Amount));
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    if value.is_zero() {
        return Err(ValidationError::InvalidAmount(trimmed.to_string()));
    }
    let magnitude = value.abs();
    if magnitude > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge {
            amount: trimmed.to_string(),
            max: MAX_AMOUNT.to_string(),
        });
    }
    Ok(magnitude)
}

/// Provides validated CRUD helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates `input`, appends a new transaction and returns a copy of it.
    pub fn add(
        ledger: &mut Ledger,
        input: TransactionInput<'_>,
        currency: &str,
        date: Timestamp,
    ) -> ServiceResult<Transaction> {
        let valid = input.validate()?;
        let txn = Transaction::new(date, valid.kind, valid.magnitude, valid.category, currency);
        ledger.push(txn.clone());
        Ok(txn)
    }

    /// Replaces amount, type and category of the first transaction matching `target`.
    pub fn update(
        ledger: &mut Ledger,
        target: &TransactionRef,
        input: TransactionInput<'_>,
    ) -> ServiceResult<Transaction> {
        let valid = input.validate()?;
        let txn = ledger
            .find_mut(target)
            .ok_or_else(|| LedgerError::NotFound(target.to_string()))?;
        txn.apply(valid.kind, valid.magnitude, valid.category);
        Ok(txn.clone())
    }

    /// Removes the first transaction matching `target`, if any.
    pub fn remove(ledger: &mut Ledger, target: &TransactionRef) -> Option<Transaction> {
        ledger.remove(target)
    }

    /// Returns the ledger's transactions in insertion order.
    pub fn list(ledger: &Ledger) -> &[Transaction] {
        ledger.transactions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn now() -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .into()
    }

    #[test]
    fn parse_amount_accepts_common_notations() {
        assert_eq!(parse_amount("12.50").unwrap(), dec!(12.50));
        assert_eq!(parse_amount(" 7 ").unwrap(), dec!(7));
        assert_eq!(parse_amount("1e3").unwrap(), dec!(1000));
        assert_eq!(parse_amount("-30").unwrap(), dec!(30));
    }

    #[test]
    fn parse_amount_rejects_non_numbers() {
        for raw in ["abc", "12,5,0", "NaN", "inf", "0", "0.00"] {
            assert!(
                matches!(parse_amount(raw), Err(ValidationError::InvalidAmount(_))),
                "`{raw}` should be rejected"
            );
        }
        assert_eq!(
            parse_amount("  "),
            Err(ValidationError::MissingField(Field::Amount))
        );
    }

    #[test]
    fn parse_amount_caps_the_magnitude() {
        assert_eq!(MAX_AMOUNT, dec!(1_000_000_000_000_000));
        assert_eq!(parse_amount("1000000000000000").unwrap(), MAX_AMOUNT);
        assert_eq!(parse_amount("-1e15").unwrap(), MAX_AMOUNT);
        assert_eq!(
            parse_amount("1000000000000000.01"),
            Err(ValidationError::AmountTooLarge {
                amount: "1000000000000000.01".into(),
                max: "1000000000000000".into(),
            })
        );
        assert!(matches!(
            parse_amount("5e20"),
            Err(ValidationError::AmountTooLarge { .. })
        ));
        assert!(matches!(
            parse_amount("79228162514264337593543950336"),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn missing_fields_are_reported_before_amount_errors() {
        let input = TransactionInput::new("not-a-number", None, "Food");
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingField(Field::Type))
        );
        let input = TransactionInput::new("not-a-number", Some(TransactionKind::Income), " ");
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingField(Field::Category))
        );
    }

    #[test]
    fn update_fails_for_missing_transaction() {
        let mut ledger = Ledger::new();
        let target = TransactionRef::Date(now());
        let err = TransactionService::update(
            &mut ledger,
            &target,
            TransactionInput::new("5", Some(TransactionKind::Expense), "Food"),
        )
        .expect_err("update must fail for unknown target");
        assert!(matches!(err, LedgerError::NotFound(_)), "{err:?}");
    }

    #[test]
    fn invalid_add_leaves_ledger_untouched() {
        let mut ledger = Ledger::new();
        let result = TransactionService::add(
            &mut ledger,
            TransactionInput::new("twelve", Some(TransactionKind::Expense), "Food"),
            "USD - $",
            now(),
        );
        assert!(result.is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let mut ledger = Ledger::new();
        let txn = TransactionService::add(
            &mut ledger,
            TransactionInput::new("42", Some(TransactionKind::Income), "Gift"),
            "USD - $",
            now(),
        )
        .unwrap();

        let removed = TransactionService::remove(&mut ledger, &TransactionRef::Id(txn.id()));
        assert_eq!(removed.map(|t| t.id()), Some(txn.id()));
        assert!(TransactionService::list(&ledger).is_empty());
    }
}

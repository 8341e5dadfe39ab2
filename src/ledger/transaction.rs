use std::{fmt, str::FromStr};

use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// Persisted timestamp layout. Lexical order matches chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Creation time of a transaction, kept at second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).map(Self::new)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|err| {
            de::Error::custom(format!(
                "invalid timestamp `{raw}` (expected YYYY-MM-DD HH:MM:SS): {err}"
            ))
        })
    }
}

/// Direction of a transaction. Drives the sign of the stored amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(alias = "income")]
    Income,
    #[serde(alias = "expense")]
    Expense,
}

impl TransactionKind {
    /// Applies the sign for this kind to an entered amount.
    pub fn signed(self, magnitude: Decimal) -> Decimal {
        match self {
            TransactionKind::Income => magnitude.abs(),
            TransactionKind::Expense => -magnitude.abs(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transaction type `{0}` (expected income or expense)")]
pub struct ParseKindError(pub String);

impl FromStr for TransactionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" | "+" => Ok(TransactionKind::Income),
            "expense" | "out" | "-" => Ok(TransactionKind::Expense),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

fn default_currency() -> String {
    crate::currency::DEFAULT_CURRENCY.to_string()
}

/// A single recorded income or expense.
///
/// Fields are read-only outside the crate so the sign of `amount` always
/// agrees with `kind`. The `date` and `currency` never change after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    date: Timestamp,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    amount: Decimal,
    #[serde(default = "default_currency")]
    currency: String,
}

impl Transaction {
    pub fn new(
        date: Timestamp,
        kind: TransactionKind,
        magnitude: Decimal,
        category: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind,
            category: category.into(),
            amount: kind.signed(magnitude),
            currency: currency.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> Timestamp {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Signed amount: negative for expenses, positive for income.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub(crate) fn apply(
        &mut self,
        kind: TransactionKind,
        magnitude: Decimal,
        category: impl Into<String>,
    ) {
        self.kind = kind;
        self.amount = kind.signed(magnitude);
        self.category = category.into();
    }
}

/// Identifies a transaction for edit and delete.
///
/// `Id` is exact. `Date` matches the creation timestamp and, when several
/// transactions share it, selects the first one in ledger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionRef {
    Id(Uuid),
    Date(Timestamp),
}

impl TransactionRef {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionRef::Id(id) => transaction.id == *id,
            TransactionRef::Date(date) => transaction.date == *date,
        }
    }
}

impl From<Uuid> for TransactionRef {
    fn from(id: Uuid) -> Self {
        TransactionRef::Id(id)
    }
}

impl From<Timestamp> for TransactionRef {
    fn from(date: Timestamp) -> Self {
        TransactionRef::Date(date)
    }
}

impl fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionRef::Id(id) => write!(f, "{id}"),
            TransactionRef::Date(date) => write!(f, "{date}"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("`{0}` is neither a transaction id nor a YYYY-MM-DD HH:MM:SS timestamp")]
pub struct ParseRefError(pub String);

impl FromStr for TransactionRef {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(id) = Uuid::parse_str(trimmed) {
            return Ok(TransactionRef::Id(id));
        }
        trimmed
            .parse::<Timestamp>()
            .map(TransactionRef::Date)
            .map_err(|_| ParseRefError(trimmed.to_string()))
    }
}

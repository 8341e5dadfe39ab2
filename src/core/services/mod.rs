pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{BalancePoint, CategoryBreakdown, CategoryShare, SummaryService, Totals};
pub use transaction_service::{parse_amount, MAX_AMOUNT, TransactionInput, TransactionService, ValidInput};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, LedgerError>;

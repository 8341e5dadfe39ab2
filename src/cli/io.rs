use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;
use crate::ledger::{Transaction, TransactionKind};

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

const KINDS: [TransactionKind; 2] = [TransactionKind::Income, TransactionKind::Expense];

/// Answers collected by [`prompt_transaction`]. Amount and category are
/// left unvalidated so the ledger reports problems the same way as for
/// typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub amount: String,
    pub kind: TransactionKind,
    pub category: String,
}

/// Current values of a stored transaction, amount shown as a magnitude.
impl From<&Transaction> for TransactionForm {
    fn from(txn: &Transaction) -> Self {
        Self {
            amount: txn.magnitude().to_string(),
            kind: txn.kind(),
            category: txn.category().to_string(),
        }
    }
}

/// Position of `kind` in the type selector.
fn kind_index(kind: TransactionKind) -> usize {
    KINDS.iter().position(|candidate| *candidate == kind).unwrap_or(1)
}

fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<&str>,
) -> Result<String, CommandError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(text) = initial {
        input = input.with_initial_text(text);
    }
    Ok(input.interact_text()?)
}

/// Asks for amount, type and category, starting from `initial` when editing.
pub fn prompt_transaction(
    theme: &ColorfulTheme,
    initial: Option<&TransactionForm>,
) -> Result<TransactionForm, CommandError> {
    let amount = prompt_text(theme, "Amount", initial.map(|form| form.amount.as_str()))?;
    let selected = Select::with_theme(theme)
        .with_prompt("Type")
        .items(&KINDS)
        .default(initial.map_or(1, |form| kind_index(form.kind)))
        .interact()?;
    let category = prompt_text(theme, "Category", initial.map(|form| form.category.as_str()))?;

    Ok(TransactionForm {
        amount,
        kind: KINDS[selected],
        category,
    })
}

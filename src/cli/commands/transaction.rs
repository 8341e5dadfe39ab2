use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::formatters::{format_amount, short_id, transactions_table};
use crate::cli::io::{self, TransactionForm};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::errors::LedgerError;
use crate::ledger::{Transaction, TransactionKind};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense",
            "add <amount> <income|expense> <category...>",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Change amount, type and category of a transaction",
            "edit <id|date> <amount> <income|expense> <category...>",
            cmd_edit,
        ),
        CommandEntry::new(
            "delete",
            "Remove a transaction",
            "delete <id|date>",
            cmd_delete,
        )
        .with_aliases(&["rm"]),
        CommandEntry::new("list", "Show all transactions", "list", cmd_list)
            .with_aliases(&["ls"]),
    ]
}

/// Amount, type and category as typed, before validation.
struct RawFields {
    amount: String,
    kind: Option<TransactionKind>,
    category: String,
}

/// Reads `<amount> <type> <category...>` from `args`, or prompts for them
/// when an interactive user typed the bare command.
fn read_fields(
    context: &ShellContext,
    args: &[&str],
    usage: &str,
    current: Option<&TransactionForm>,
) -> Result<RawFields, CommandError> {
    if args.is_empty() && context.mode == CliMode::Interactive {
        let TransactionForm {
            amount,
            kind,
            category,
        } = io::prompt_transaction(&context.theme, current)?;
        return Ok(RawFields {
            amount,
            kind: Some(kind),
            category,
        });
    }

    let [amount, kind, category @ ..] = args else {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    };
    let kind = kind
        .parse::<TransactionKind>()
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    Ok(RawFields {
        amount: amount.to_string(),
        kind: Some(kind),
        category: category.join(" "),
    })
}

fn describe(txn: &Transaction) -> String {
    format!(
        "{} {} {} ({})",
        txn.kind(),
        format_amount(txn.amount(), txn.currency()),
        txn.category(),
        short_id(txn)
    )
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let fields = read_fields(context, args, "add <amount> <income|expense> <category...>", None)?;
    let txn = context.store.add(
        &fields.amount,
        fields.kind,
        &fields.category,
        &context.config.currency,
    )?;
    output::success(format!("Added {}", describe(&txn)));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (target, consumed) = context.take_target(args)?;
    let current = context
        .store
        .get(&target)
        .map(TransactionForm::from)
        .ok_or_else(|| LedgerError::NotFound(target.to_string()))?;
    let fields = read_fields(
        context,
        &args[consumed..],
        "edit <id|date> <amount> <income|expense> <category...>",
        Some(&current),
    )?;
    let txn = context
        .store
        .edit(&target, &fields.amount, fields.kind, &fields.category)?;
    output::success(format!("Updated {}", describe(&txn)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (target, consumed) = context.take_target(args)?;
    if consumed != args.len() {
        return Err(CommandError::InvalidArguments("usage: delete <id|date>".into()));
    }
    let Some(existing) = context.store.get(&target) else {
        output::warning(format!("No transaction matches `{target}`."));
        return Ok(());
    };
    let prompt = format!("Delete {}?", describe(existing));
    if !context.confirm(&prompt)? {
        output::info("Operation cancelled.");
        return Ok(());
    }
    if context.store.delete(&target)? {
        output::success("Transaction deleted.");
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transactions = context.store.list();
    if transactions.is_empty() {
        output::info("No transactions recorded.");
        return Ok(());
    }
    println!("{}", transactions_table(transactions));
    Ok(())
}

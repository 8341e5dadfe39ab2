use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters::{breakdown_table, totals_lines, trend_table};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const NO_DATA: &str = "No expense data available";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "expenses",
            "Expense totals per category with shares",
            "expenses",
            cmd_expenses,
        ),
        CommandEntry::new(
            "trend",
            "Running balance after each transaction, by date",
            "trend",
            cmd_trend,
        ),
        CommandEntry::new(
            "summary",
            "Total income, expenses and balance",
            "summary",
            cmd_summary,
        )
        .with_aliases(&["balance"]),
    ]
}

fn cmd_expenses(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let breakdown = context.store.expenses_by_category();
    if breakdown.is_empty() {
        output::info(NO_DATA);
        return Ok(());
    }
    output::section("Expenses by category");
    println!("{}", breakdown_table(&breakdown, &context.config.currency));
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let points = context.store.balance_trend();
    if points.is_empty() {
        output::info(NO_DATA);
        return Ok(());
    }
    output::section("Balance over time");
    println!("{}", trend_table(&points, &context.config.currency));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = context.store.totals();
    output::section("Summary");
    for line in totals_lines(&totals, &context.config.currency) {
        println!("  {line}");
    }
    Ok(())
}

mod common;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn script(base: &Path, input: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("finance_ledger_cli").unwrap();
    cmd.env("FINANCE_LEDGER_CLI_SCRIPT", "1")
        .env("FINANCE_LEDGER_HOME", base)
        .env("RUST_LOG", "off")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn script_mode_runs_basic_flow() {
    let base = common::temp_base();
    script(
        &base,
        "add 1000 income Salary\nadd 200 expense Groceries\nadd 50 expense Transport\nsummary\nexit\n",
    )
    .success()
    .stdout(contains("Added Income 1000.00 $ Salary"))
    .stdout(contains("Balance : 750.00 $"));

    let json = std::fs::read_to_string(base.join("finance_data.json")).unwrap();
    assert!(json.contains("\"Groceries\""));
    assert!(json.contains("\"USD - $\""));
}

#[test]
fn reports_without_expenses_say_so() {
    let base = common::temp_base();
    script(&base, "expenses\ntrend\n")
        .success()
        .stdout(contains("No expense data available").count(2));
}

#[test]
fn expenses_report_lists_shares() {
    let base = common::temp_base();
    script(
        &base,
        "add 300 expense Rent\nadd 100 expense \"Eating out\"\nexpenses\n",
    )
    .success()
    .stdout(contains("Rent"))
    .stdout(contains("Eating out"))
    .stdout(contains("75.0%"))
    .stdout(contains("25.0%"));
}

#[test]
fn invalid_amount_is_reported_and_shell_continues() {
    let base = common::temp_base();
    script(&base, "add abc expense Food\nadd 5 expense Food\nlist\n")
        .success()
        .stderr(contains("invalid amount `abc`"))
        .stdout(contains("Food"))
        .stdout(contains("5.00 $"));

    let store = common::open_store(&base);
    assert_eq!(store.len(), 1);
}

#[test]
fn currency_change_persists_and_applies_to_new_transactions() {
    let base = common::temp_base();
    script(&base, "currency eur\nadd 12.5 expense Lunch\n")
        .success()
        .stdout(contains("Currency set to EUR - €"));

    script(&base, "currency\nlist\n")
        .success()
        .stdout(contains("Active currency: EUR - €"))
        .stdout(contains("12.50 €"));
}

#[test]
fn delete_by_listed_id_prefix() {
    let base = common::temp_base();
    script(&base, "add 9 expense Cinema\n").success();
    let store = common::open_store(&base);
    let prefix = store.list()[0].id().simple().to_string()[..8].to_string();

    script(&base, &format!("delete {prefix}\nlist\n"))
        .success()
        .stdout(contains("Transaction deleted."))
        .stdout(contains("No transactions recorded."));
}

#[test]
fn unknown_command_suggests_closest() {
    let base = common::temp_base();
    script(&base, "lisst\n")
        .success()
        .stdout(contains("Unknown command `lisst`"))
        .stdout(contains("Did you mean `list`?"));
}

#[test]
fn quit_stops_reading_input() {
    let base = common::temp_base();
    script(&base, "quit\nadd 1 expense Ignored\n")
        .success()
        .stdout(contains("Added").not());
    assert!(!base.join("finance_data.json").exists());
}

use tracing::info;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::currency::SUPPORTED_CURRENCIES;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "currency",
        "Show or change the currency used for new transactions",
        "currency [code|label]",
        cmd_currency,
    )]
}

fn cmd_currency(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        output::info(format!("Active currency: {}", context.config.currency));
        output::hint(format!("Available: {}", SUPPORTED_CURRENCIES.join(", ")));
        return Ok(());
    }

    let query = args.join(" ");
    let label = context.config.set_currency(&query)?.to_string();
    context.config_manager.save(&context.config)?;
    info!(currency = %label, "currency changed");
    output::success(format!(
        "Currency set to {label}. Existing transactions keep their own currency."
    ));
    Ok(())
}

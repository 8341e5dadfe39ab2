use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for entry in registry.list() {
        println!("  {:<10} {}", entry.name, entry.description);
    }
    output::hint("Use `help <command>` for details. Press Tab to complete command names.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    println!("  Description: {}", entry.description);
    println!("  Usage      : {}", entry.usage);
    if !entry.aliases.is_empty() {
        println!("  Aliases    : {}", entry.aliases.join(", "));
    }
}

pub mod commands;
pub mod core;
pub mod formatters;
mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;

pub use self::core::{CliError, CliMode, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};

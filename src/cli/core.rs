//! Shared runtime state for the shell and command execution.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use tracing::debug;

use crate::{
    cli::{commands, io as cli_io, output, registry::CommandRegistry, shell},
    config::{Config, ConfigManager},
    core::LedgerStore,
    currency,
    errors::LedgerError,
    ledger::TransactionRef,
    storage::JsonStorage,
};

/// Shortest id prefix accepted in place of a full transaction id.
const MIN_ID_PREFIX: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Ledger(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Builds a context over the default data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::from_manager(mode, ConfigManager::new()?)
    }

    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        Self::from_manager(mode, ConfigManager::with_base_dir(base)?)
    }

    fn from_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let data_file = config.data_file_in(config_manager.base_dir());
        let store = LedgerStore::open(Box::new(JsonStorage::new(data_file)))?;
        output::set_plain(mode == CliMode::Script);

        Ok(Self {
            mode,
            registry,
            store,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    pub fn prompt(&self) -> String {
        format!("finance [{}]> ", currency::code(&self.config.currency))
    }

    /// Tokenizes and runs one input line.
    pub fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        debug!(command, ?args, "dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.closest(input) {
            output::hint(format!("Did you mean `{}`?", best));
        }
    }

    /// Asks for confirmation interactively; scripts always proceed.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        self.confirm("Exit shell?")
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Ledger(LedgerError::Validation(inner)) => {
                output::error(inner);
            }
            other => output::error(other),
        }
    }

    /// Reads a transaction reference from the front of `args`.
    ///
    /// Accepts a full id, a unique id prefix as printed by `list`, or a
    /// creation timestamp, quoted or split over two arguments. Returns the
    /// reference and how many arguments it consumed.
    pub(crate) fn take_target(&self, args: &[&str]) -> Result<(TransactionRef, usize), CommandError> {
        let first = args
            .first()
            .ok_or_else(|| CommandError::InvalidArguments("missing transaction id or date".into()))?;
        if let Ok(target) = first.parse::<TransactionRef>() {
            return Ok((target, 1));
        }
        if let Some(second) = args.get(1) {
            if let Ok(target) = format!("{first} {second}").parse::<TransactionRef>() {
                return Ok((target, 2));
            }
        }
        self.resolve_prefix(first).map(|target| (target, 1))
    }

    fn resolve_prefix(&self, prefix: &str) -> Result<TransactionRef, CommandError> {
        let needle = prefix.trim().to_ascii_lowercase().replace('-', "");
        if needle.len() < MIN_ID_PREFIX {
            return Err(CommandError::InvalidArguments(format!(
                "`{prefix}` is not a transaction id or date (ids need at least {MIN_ID_PREFIX} characters)"
            )));
        }
        let mut matches = self
            .store
            .list()
            .iter()
            .filter(|txn| txn.id().simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(TransactionRef::Id(txn.id())),
            (Some(_), Some(_)) => Err(CommandError::InvalidArguments(format!(
                "id prefix `{prefix}` matches several transactions"
            ))),
            (None, _) => Err(CommandError::Ledger(LedgerError::NotFound(prefix.to_string()))),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(base: PathBuf, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut context = ShellContext::with_base_dir(CliMode::Script, base)?;
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    #[test]
    fn script_lines_run_until_exit() {
        let temp = TempDir::new().unwrap();
        let context = process_script(
            temp.path().to_path_buf(),
            &[
                "add 1000 income Salary",
                "add 200 expense Groceries",
                "add 50 expense Public transport",
                "exit",
                "add 1 expense Ignored",
            ],
        )
        .unwrap();

        let list = context.store.list();
        assert_eq!(list.len(), 3);
        assert_eq!(list[2].category(), "Public transport");
        assert_eq!(list[1].kind(), TransactionKind::Expense);
        assert_eq!(context.store.totals().balance, dec!(750));
        assert!(!context.running);
    }

    #[test]
    fn id_prefix_resolves_to_single_transaction() {
        let temp = TempDir::new().unwrap();
        let mut context =
            process_script(temp.path().to_path_buf(), &["add 5 expense Coffee"]).unwrap();
        let id = context.store.list()[0].id();
        let prefix = id.simple().to_string()[..6].to_string();

        let (target, consumed) = context.take_target(&[prefix.as_str()]).unwrap();
        assert_eq!(target, TransactionRef::Id(id));
        assert_eq!(consumed, 1);

        context
            .process_line(&format!("delete {prefix}"))
            .unwrap();
        assert!(context.store.is_empty());
    }

    #[test]
    fn edit_by_quoted_date_keeps_currency() {
        let temp = TempDir::new().unwrap();
        let mut context = process_script(
            temp.path().to_path_buf(),
            &["currency gbp", "add 40 expense Books"],
        )
        .unwrap();
        let original = context.store.list()[0].clone();

        context
            .process_line(&format!("edit \"{}\" 55 income Resale", original.date()))
            .unwrap();
        let edited = &context.store.list()[0];
        assert_eq!(edited.id(), original.id());
        assert_eq!(edited.amount(), dec!(55));
        assert_eq!(edited.category(), "Resale");
        assert_eq!(edited.currency(), "GBP - £");
    }

    #[test]
    fn split_timestamp_consumes_two_arguments() {
        let temp = TempDir::new().unwrap();
        let context = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
            .unwrap();
        let (target, consumed) = context
            .take_target(&["2024-01-05", "10:00:00", "12"])
            .unwrap();
        assert_eq!(consumed, 2);
        assert!(matches!(target, TransactionRef::Date(_)));
    }

    #[test]
    fn unknown_commands_do_not_stop_the_shell() {
        let temp = TempDir::new().unwrap();
        let mut context = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
            .unwrap();
        let control = context.process_line("balanc").unwrap();
        assert_eq!(control, LoopControl::Continue);
        assert!(context.running);
    }
}

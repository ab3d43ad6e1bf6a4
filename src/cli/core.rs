//! Shell context, dispatch, and argument helpers shared by command handlers.

use std::{io, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::config::{Config, ConfigManager};
use crate::core::services::ServiceError;
use crate::core::{BudgetSession, LoadMetadata, SessionOptions, SystemClock};
use crate::errors::TrackerError;
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};

pub use crate::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error(transparent)]
    Service(ServiceError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Tracker(err) => CommandError::Tracker(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
            other => CommandError::Service(other),
        }
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: BudgetSession,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Loads config from the base directory and opens the budget store it names.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let store_dir = config_manager.store_dir(&config);
        let store: Box<dyn KeyValueStore> = match JsonFileStore::new(&store_dir) {
            Ok(store) => Box::new(store),
            Err(err) => {
                tracing::warn!(dir = %store_dir.display(), "cannot open store: {err}");
                Box::new(MemoryStore::new())
            }
        };
        let (session, metadata) = BudgetSession::open(
            store,
            SessionOptions::from_config(&config),
            Arc::new(SystemClock),
        )?;
        let context = Self::with_session(mode, session, config);
        context.report_load(&metadata);
        Ok(context)
    }

    pub fn with_session(mode: CliMode, session: BudgetSession, config: Config) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
            quiet_mode: mode == CliMode::Script,
        });
        Self {
            mode,
            registry,
            session,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        }
    }

    fn report_load(&self, metadata: &LoadMetadata) {
        for warning in &metadata.warnings {
            cli_io::print_warning(warning);
        }
        if !metadata.migrations.is_empty() {
            cli_io::print_info(format!(
                "Upgraded stored data ({} change(s)).",
                metadata.migrations.len()
            ));
        }
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub(crate) fn currency(&self) -> &str {
        &self.config.currency_symbol
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        let mut prompt = String::from("budget");
        if let Some(index) = self.session.editing_note() {
            prompt.push_str(&format!(" [note {}]", index + 1));
        }
        if let Some(index) = self.session.editing_credential() {
            prompt.push_str(&format!(" [password {}]", index + 1));
        }
        prompt.push_str("> ");
        prompt
    }

    /// Wizards and prompts only run in an interactive shell.
    pub(crate) fn require_interactive(&self, usage: &str) -> CommandResult {
        match self.mode {
            CliMode::Interactive => Ok(()),
            CliMode::Script => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest_command(self.registry.names(), input) {
            cli_io::print_info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Tracker(err) => {
                cli_io::print_error(format!("Could not save: {err}"));
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }
}

/// Nearest registered name within edit distance 3.
fn closest_command<'a>(
    names: impl Iterator<Item = &'a str>,
    input: &str,
) -> Option<&'a str> {
    let needle = input.to_lowercase();
    names
        .map(|name| (levenshtein(name, &needle), name))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

/// Parses a user-entered amount.
pub(crate) fn parse_amount(label: &str, raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("{label} `{raw}` is not a valid number"))
        })
}

/// Turns a one-based list position into an index.
pub(crate) fn parse_position(list: &str, raw: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "{list} position `{raw}` must be a whole number starting at 1"
        ))),
    }
}

pub(crate) fn parse_count(label: &str, raw: &str) -> Result<u32, CommandError> {
    raw.trim().parse::<u32>().map_err(|_| {
        CommandError::InvalidArguments(format!("{label} `{raw}` must be a whole number"))
    })
}

use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};

use crate::cli::core::CommandError;
use crate::cli::output;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

pub fn print_hint(message: impl fmt::Display) {
    output::hint(message);
}

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

/// Free-form text; `initial` pre-fills the field and empty input is allowed.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<&str>,
) -> Result<String, CommandError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    input.interact_text().map_err(CommandError::from)
}

pub fn prompt_secret(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Password::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(CommandError::from)
}

pub fn select(theme: &ColorfulTheme, prompt: &str, items: &[&str]) -> Result<usize, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(CommandError::from)
}

use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::info as output_info;

const SCRIPT_ENV: &str = "BUDGET_TRACKER_CLI_SCRIPT";

/// Subcommands offered by completion after a top-level command.
const SUBCOMMANDS: &[(&str, &[&str])] = &[
    ("income", &["add", "edit", "rm", "list"]),
    ("expense", &["add", "edit", "rm", "list"]),
    ("note", &["add", "edit", "save", "cancel", "rm", "list"]),
    ("password", &["add", "edit", "save", "cancel", "rm", "list"]),
];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output_info("Type `help` to list commands.");

    while context.running {
        let prompt = context.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => match context.confirm_exit() {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => context.report_error(err)?,
            },
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            crate::cli::io::print_warning(&err);
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(line.to_string());

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, words: &[&str], needle: &str) -> Vec<String> {
        let pool: Vec<&str> = match words {
            [] => self.commands.iter().map(String::as_str).collect(),
            [command] => SUBCOMMANDS
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(command))
                .map(|(_, subs)| subs.to_vec())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        pool.into_iter()
            .filter(|name| name.starts_with(needle))
            .map(str::to_string)
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();
        let needle = prefix[start..].to_ascii_lowercase();

        let candidates = self
            .candidates(&words, &needle)
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse command line: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_commands_then_subcommands() {
        let helper = CommandHelper::new(vec!["income", "expense", "exit", "note"]);
        assert_eq!(helper.candidates(&[], "ex"), vec!["exit", "expense"]);
        assert_eq!(helper.candidates(&["note"], "s"), vec!["save"]);
        assert!(helper.candidates(&["income", "add"], "").is_empty());
    }

    #[test]
    fn expense_completion_offers_every_action() {
        let helper = CommandHelper::new(vec!["expense"]);
        assert_eq!(
            helper.candidates(&["expense"], ""),
            vec!["add", "edit", "rm", "list"]
        );
        assert_eq!(helper.candidates(&["expense"], "e"), vec!["edit"]);
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line("note add 'Car service' \"due in May\"").unwrap();
        assert_eq!(tokens, vec!["note", "add", "Car service", "due in May"]);
        assert!(parse_command_line("note add 'unterminated").is_err());
    }
}

use crate::cli::core::{parse_position, CliMode, CommandResult, ShellContext};
use crate::cli::formatters::{credential_row, note_row};
use crate::cli::io;
use crate::cli::output::section;
use crate::cli::registry::CommandEntry;

use super::usage_error;

const NOTE_USAGE: &str = "note list
note add <title> <content>
note edit <#>
note save [title] [content]   (blank keeps the current text)
note cancel
note rm <#>";
const PASSWORD_USAGE: &str = "password list [--reveal]
password add <service> <user> <password>
password edit <#>
password save [service] [user] [password]   (blank keeps the current value)
password cancel
password rm <#>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("note", "Keep short notes", NOTE_USAGE, cmd_note),
        CommandEntry::new(
            "password",
            "Keep service logins",
            PASSWORD_USAGE,
            cmd_password,
        ),
    ]
}

fn cmd_note(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => {
            list_notes(context);
            Ok(())
        }
        ["add", title, content] => {
            let index = context.session.add_note(title, content)?;
            io::print_success(format!("Note #{} added.", index + 1));
            Ok(())
        }
        ["add"] => {
            context.require_interactive(NOTE_USAGE)?;
            let title = io::prompt_text(context.theme(), "Title", None)?;
            let content = io::prompt_text(context.theme(), "Content", None)?;
            let index = context.session.add_note(&title, &content)?;
            io::print_success(format!("Note #{} added.", index + 1));
            Ok(())
        }
        ["edit", position] => {
            let index = parse_position("note", position)?;
            let note = context.session.begin_note_edit(index)?.clone();
            if context.mode() == CliMode::Script {
                io::print_info(format!("Editing note #{}: {}", index + 1, note.title));
                io::print_hint("Finish with `note save [title] [content]` or `note cancel`.");
                return Ok(());
            }
            let title = io::prompt_text(context.theme(), "Title", Some(&note.title))?;
            let content = io::prompt_text(context.theme(), "Content", Some(&note.content))?;
            save_note(context, &title, &content)
        }
        ["save", rest @ ..] if rest.len() <= 2 => {
            let title = rest.first().copied().unwrap_or("");
            let content = rest.get(1).copied().unwrap_or("");
            save_note(context, title, content)
        }
        ["cancel"] => {
            context.session.cancel_note_edit();
            io::print_info("Note edit cancelled.");
            Ok(())
        }
        ["rm" | "remove", position] => {
            let index = parse_position("note", position)?;
            let removed = context.session.remove_note(index)?;
            io::print_success(format!("Removed note `{}`.", removed.title));
            Ok(())
        }
        _ => Err(usage_error(NOTE_USAGE)),
    }
}

fn save_note(context: &mut ShellContext, title: &str, content: &str) -> CommandResult {
    let note = context.session.save_note_edit(title, content)?;
    io::print_success(format!("Note `{}` saved.", note.title));
    Ok(())
}

fn list_notes(context: &ShellContext) {
    let notes = &context.session.state().notes;
    section("Notes");
    if notes.is_empty() {
        io::print_info("No notes yet.");
        return;
    }
    let editing = context.session.editing_note();
    for (index, note) in notes.iter().enumerate() {
        io::print_info(note_row(index + 1, note, editing == Some(index)));
    }
}

fn cmd_password(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => {
            list_credentials(context, false);
            Ok(())
        }
        ["list", "--reveal"] => {
            list_credentials(context, true);
            Ok(())
        }
        ["add", service, user, secret] => {
            let index = context.session.add_credential(service, user, secret)?;
            io::print_success(format!("Password #{} added.", index + 1));
            Ok(())
        }
        ["add"] => {
            context.require_interactive(PASSWORD_USAGE)?;
            let service = io::prompt_text(context.theme(), "Service", None)?;
            let user = io::prompt_text(context.theme(), "User", None)?;
            let secret = io::prompt_secret(context.theme(), "Password")?;
            let index = context.session.add_credential(&service, &user, &secret)?;
            io::print_success(format!("Password #{} added.", index + 1));
            Ok(())
        }
        ["edit", position] => {
            let index = parse_position("password", position)?;
            let entry = context.session.begin_credential_edit(index)?.clone();
            if context.mode() == CliMode::Script {
                io::print_info(format!("Editing password #{}: {}", index + 1, entry.service));
                io::print_hint(
                    "Finish with `password save [service] [user] [password]` or `password cancel`.",
                );
                return Ok(());
            }
            let service = io::prompt_text(context.theme(), "Service", Some(&entry.service))?;
            let user = io::prompt_text(context.theme(), "User", Some(&entry.user))?;
            let secret = io::prompt_secret(context.theme(), "Password (blank keeps it)")?;
            save_credential(context, &service, &user, &secret)
        }
        ["save", rest @ ..] if rest.len() <= 3 => {
            let field = |position: usize| rest.get(position).copied().unwrap_or("");
            save_credential(context, field(0), field(1), field(2))
        }
        ["cancel"] => {
            context.session.cancel_credential_edit();
            io::print_info("Password edit cancelled.");
            Ok(())
        }
        ["rm" | "remove", position] => {
            let index = parse_position("password", position)?;
            let removed = context.session.remove_credential(index)?;
            io::print_success(format!("Removed password for `{}`.", removed.service));
            Ok(())
        }
        _ => Err(usage_error(PASSWORD_USAGE)),
    }
}

fn save_credential(
    context: &mut ShellContext,
    service: &str,
    user: &str,
    secret: &str,
) -> CommandResult {
    let entry = context.session.save_credential_edit(service, user, secret)?;
    io::print_success(format!("Password for `{}` saved.", entry.service));
    Ok(())
}

fn list_credentials(context: &ShellContext, reveal: bool) {
    let entries = &context.session.state().passwords;
    section("Passwords");
    if entries.is_empty() {
        io::print_info("No passwords stored yet.");
        return;
    }
    let editing = context.session.editing_credential();
    for (index, entry) in entries.iter().enumerate() {
        io::print_info(credential_row(
            index + 1,
            entry,
            editing == Some(index),
            reveal,
        ));
    }
}

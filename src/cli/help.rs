use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.list() {
        io::print_info(format!("  {:<10} {}", entry.name, entry.description));
    }
    io::print_hint("Use `help <command>` for usage details. Positions start at 1.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  {}", entry.description));
    for line in entry.usage.lines() {
        io::print_info(format!("  {}", line));
    }
}

pub mod commands;
pub mod core;
pub mod formatters;
pub mod forms;
mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;

pub use shell::run_cli;

use thiserror::Error;

/// Error type shared by the storage, configuration, and service layers.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure at the binary boundary: anything that stops the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

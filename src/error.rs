//! Error types for the enrollment registry

use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while running registry commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Learner not found: {0}")]
    NotFound(String),

    #[error("Malformed command '{command}': {reason}")]
    MalformedCommand { command: String, reason: String },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Score overflow for {learner} (delta {delta})")]
    ScoreOverflow { learner: String, delta: i64 },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Field-free discriminant of [`RegistryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    MalformedCommand,
    UnknownCommand,
    ScoreOverflow,
    Config,
    Io,
}

impl RegistryError {
    pub fn malformed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        RegistryError::MalformedCommand {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::MalformedCommand { .. } => ErrorKind::MalformedCommand,
            RegistryError::UnknownCommand(_) => ErrorKind::UnknownCommand,
            RegistryError::ScoreOverflow { .. } => ErrorKind::ScoreOverflow,
            RegistryError::Config(_) => ErrorKind::Config,
            RegistryError::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for RegistryError {
    fn from(err: toml::de::Error) -> Self {
        RegistryError::Config(err.to_string())
    }
}

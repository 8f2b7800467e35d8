//! Common error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The program could not be started at all
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully
    #[error("`{command}` exited with {}: {stderr}", exit_code_text(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{command}` timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Other error: {0}")]
    Other(String),
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl Error {
    /// True for the failures of an external command (spawn, exit status, timeout)
    pub fn is_command_failure(&self) -> bool {
        matches!(
            self,
            Error::Spawn { .. } | Error::CommandFailed { .. } | Error::Timeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

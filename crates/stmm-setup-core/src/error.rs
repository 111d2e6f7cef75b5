//! Typed errors that callers need to tell apart.
//!
//! Everything else travels as `anyhow::Error` with context attached.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid value '{value}' for {option} (expected one of: {expected})")]
    InvalidChoice {
        option: &'static str,
        value: String,
        expected: String,
    },

    #[error("cannot expand '{0}': home directory is unknown")]
    NoHomeDir(String),

    #[error("invalid defaults file {}: {message}", path.display())]
    InvalidDefaults { path: PathBuf, message: String },

    #[error("failed to launch `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` {}", describe_exit(*code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("input closed before the confirmation was answered")]
    PromptClosed,
}

impl SetupError {
    /// Process exit code to report for this error.
    ///
    /// A failing child passes its own status through; a child killed by a
    /// signal, and every other error, maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            SetupError::InvalidChoice { .. }
            | SetupError::NoHomeDir(_)
            | SetupError::InvalidDefaults { .. } => 2,
            _ => 1,
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

//! Error taxonomy shared across commands.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found: {}", path.display())]
    ConfigMissing { path: PathBuf },

    #[error("failed to parse config file: {reason}")]
    ConfigParse { reason: String },

    #[error("{0}")]
    Validation(String),

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String, hint: Option<String> },

    #[error("{0}")]
    ChildProcess(String),

    #[error("could not open {ide}: `{command}` is not available; make sure it is installed and on PATH")]
    IdeLaunch { ide: String, command: String },
}

impl Error {
    /// User-facing follow-up line printed dimmed under the error message.
    pub fn hint(&self) -> Option<String> {
        match self {
            Error::ConfigMissing { .. } => {
                Some("run `pj config` to create the default configuration".to_string())
            }
            Error::NotFound { hint, .. } => hint.clone(),
            _ => None,
        }
    }
}

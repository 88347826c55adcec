//! Domain-specific errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while producing or writing a playbook document.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to serialize playbook: {0}")]
    Serialization(#[from] serde_yaml::Error),
    #[error("failed to write playbook to '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returned when a string does not name one of the fixed form choices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChoiceParseError {
    #[error("unknown operating system '{0}' (expected linux, windows or all)")]
    UnknownOs(String),
    #[error("unknown host group '{0}' (expected all, workstations or servers)")]
    UnknownHosts(String),
}

//! Keymap error types

use thiserror::Error;

/// Errors that can occur when binding combinations or loading keymaps
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    #[error("Empty key combination")]
    EmptyCombination,

    /// The combination ends in an empty token, e.g. `"ctrl+"`
    #[error("No key found in combination: {0}")]
    MissingKey(String),

    #[error("Key sequences are disabled, cannot bind '{0}'")]
    SequencesUnsupported(String),

    #[error("No callback found for action {action} (referenced by key combinations {combos})")]
    MissingCallback { action: String, combos: String },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type KeymapResult<T> = Result<T, KeymapError>;

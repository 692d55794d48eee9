//! Error types for the command menu

use thiserror::Error;

/// Errors raised by the menu core
///
/// Input that merely fails to parse is not an error: numeric entry falls back
/// to zero and unknown keys are ignored. These variants cover the failures of
/// external collaborators and of table/config construction.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Writing to the output channel failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Two menu entries share the same trigger key
    #[error("duplicate menu key: {:?}", char::from(*.0))]
    DuplicateKey(u8),

    /// The broken-down time does not map onto a representable calendar date
    #[error("date/time out of range: {0}")]
    TimeOutOfRange(String),

    /// Configuration rejected by validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

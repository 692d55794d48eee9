//! Error types for the host console

use thiserror::Error;

/// Errors that can occur while bringing up the console
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// No serial port configured and none found
    #[error("no serial ports available")]
    NoPorts,

    /// Failed to enumerate serial ports
    #[error("failed to enumerate ports: {0}")]
    EnumerationFailed(String),

    /// Failed to open serial port
    #[error("failed to open port {port}: {reason}")]
    OpenFailed { port: String, reason: String },

    /// Settings file could not be written
    #[error("settings {path}: {reason}")]
    Settings { path: String, reason: String },

    /// Serial port error
    #[error("serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    /// Error from the menu loop
    #[error(transparent)]
    Menu(#[from] menu_core::MenuError),
}

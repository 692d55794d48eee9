//! Single-keystroke dispatch

use std::io::Write;

use tracing::{debug, trace, warn};

use crate::channel::OutputChannel;
use crate::error::MenuError;
use crate::handlers::Session;

/// Outcome of one dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// No input was pending
    Idle,
    /// A key was read but no entry is bound to it
    Unmatched(u8),
    /// The entry bound to this key ran to completion
    Invoked(u8),
}

/// Read one pending key and run the matching entry
///
/// The current line is cleared before anything else is printed, so the
/// terminal's echo of the keystroke is erased. The call blocks for as long
/// as the selected action runs. With no key pending, a transport failure
/// reported by the input is returned as an error.
pub fn run_once(session: &mut Session<'_>) -> Result<Dispatch, MenuError> {
    let key = if session.input.available() {
        session.input.read_byte()
    } else {
        None
    };
    let Some(key) = key else {
        if let Some(e) = session.input.take_error() {
            warn!("Serial input failed: {}", e);
            return Err(e.into());
        }
        return Ok(Dispatch::Idle);
    };

    session.output.clear_line()?;

    let registry = session.registry;
    match registry.lookup(key) {
        Some(entry) => {
            debug!("Dispatching {:?} ({})", char::from(key), entry.label);
            (entry.action)(session, entry.arg)?;
            session.output.flush()?;
            Ok(Dispatch::Invoked(key))
        }
        None => {
            trace!("No menu entry for key 0x{:02X}", key);
            Ok(Dispatch::Unmatched(key))
        }
    }
}

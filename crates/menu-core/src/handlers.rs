//! Menu actions
//!
//! Every action gets the [`Session`] of the current dispatch and the argument
//! string bound in the menu table. Actions that collect input first wait the
//! settle delay, then drain the stream until it falls silent; the value is
//! only echoed after the last byte plus one inactivity timeout.

use std::io::Write;

use tracing::{info, warn};

use crate::channel::{Clock, IndicatorLine, InputChannel, OutputChannel};
use crate::config::MenuConfig;
use crate::datetime::{format_datetime, scan_datetime, BrokenDownTime, TimeService};
use crate::error::MenuError;
use crate::heartbeat::HeartbeatState;
use crate::registry::ActionRegistry;

/// Title block printed above the menu listing
pub const MENU_BANNER: &str = "\n---------------\n CLI Menu Demo \n---------------\n";

/// Printed after the menu listing
pub const MENU_PROMPT: &str = "\nPress a key: ";

/// Everything an action may touch while it runs
pub struct Session<'a> {
    /// Keys and typed values
    pub input: &'a mut dyn InputChannel,
    /// Replies to the terminal
    pub output: &'a mut dyn OutputChannel,
    /// Settle delays
    pub clock: &'a mut dyn Clock,
    /// Date and time entries
    pub rtc: &'a mut dyn TimeService,
    /// Heartbeat line, forced low when the heartbeat is switched off
    pub indicator: &'a mut dyn IndicatorLine,
    /// Flag flipped by the toggle entry
    pub heartbeat: &'a mut HeartbeatState,
    /// Table being dispatched, listed by the menu entry
    pub registry: &'a ActionRegistry,
    /// Timing in effect
    pub config: &'a MenuConfig,
}

impl Session<'_> {
    fn settle(&mut self) {
        self.clock.delay(self.config.settle_delay());
    }

    /// Keep the last value `parse` produces before the stream goes quiet
    fn drain<T>(&mut self, mut parse: impl FnMut(&mut dyn InputChannel) -> Option<T>) -> Option<T> {
        let mut value = None;
        while self.input.available() {
            if let Some(v) = parse(&mut *self.input) {
                value = Some(v);
            }
        }
        value
    }
}

/// Print the argument (a greeting)
pub fn say_hello(session: &mut Session<'_>, arg: &str) -> Result<(), MenuError> {
    write!(session.output, "{}", arg)?;
    Ok(())
}

/// Stand-in for starting a network stream
pub fn play_radio(session: &mut Session<'_>, url: &str) -> Result<(), MenuError> {
    info!("Radio requested: {}", url);
    write!(session.output, "Playing: {}", url)?;
    Ok(())
}

/// Read an integer and echo it
pub fn enter_integer(session: &mut Session<'_>, _arg: &str) -> Result<(), MenuError> {
    session.settle();
    let value = session.drain(|input| input.parse_int()).unwrap_or(0);
    write!(session.output, "{} was entered ", value)?;
    Ok(())
}

/// Read a float and echo it with six decimals
pub fn enter_float(session: &mut Session<'_>, _arg: &str) -> Result<(), MenuError> {
    session.settle();
    let value = session.drain(|input| input.parse_float()).unwrap_or(0.0);
    write!(session.output, "{:.6} was entered ", value)?;
    Ok(())
}

/// Read raw bytes and echo them unchanged
pub fn enter_string(session: &mut Session<'_>, _arg: &str) -> Result<(), MenuError> {
    session.settle();
    let bytes = session
        .drain(|input| Some(input.read_bytes()))
        .unwrap_or_default();
    session.output.write_all(&bytes)?;
    Ok(())
}

/// Switch the heartbeat indicator on or off
pub fn toggle_heartbeat(session: &mut Session<'_>, _arg: &str) -> Result<(), MenuError> {
    let enabled = session.heartbeat.toggle();
    info!("Heartbeat {}", if enabled { "enabled" } else { "disabled" });
    if enabled {
        write!(session.output, "Heartbeat on ")?;
    } else {
        session.indicator.set(false);
        write!(session.output, "Heartbeat off ")?;
    }
    Ok(())
}

/// Print the banner, every entry label and the prompt
pub fn show_menu(session: &mut Session<'_>, _arg: &str) -> Result<(), MenuError> {
    let out = &mut *session.output;
    out.write_all(MENU_BANNER.as_bytes())?;
    for entry in session.registry.entries() {
        write!(out, "{}\r\n", entry.label)?;
    }
    out.write_all(MENU_PROMPT.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Read `yyyy mo dd hh mm ss` and set the real-time clock
pub fn set_date_time(session: &mut Session<'_>, arg: &str) -> Result<(), MenuError> {
    let timeout = session.input.timeout();
    session.settle();

    session
        .input
        .set_timeout(timeout * session.config.datetime_timeout_factor);
    let text = session
        .drain(|input| Some(input.read_string()))
        .unwrap_or_default();
    session.input.set_timeout(timeout);

    let fields = scan_datetime(&text);
    if !fields.is_complete() {
        warn!(
            "Date/time entry {:?} matched only {} of 6 fields",
            text.trim(),
            fields.matched
        );
    }

    let time = BrokenDownTime::from_fields(&fields);
    session.rtc.set(&time)?;
    info!("Clock set to {}", format_datetime(&session.rtc.now()));

    show_date_time(session, arg)
}

/// Print the current time of the real-time clock
pub fn show_date_time(session: &mut Session<'_>, _arg: &str) -> Result<(), MenuError> {
    let now = session.rtc.now();
    write!(session.output, "{}", format_datetime(&now))?;
    Ok(())
}

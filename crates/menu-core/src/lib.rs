//! Serial Command Menu
//!
//! A single-keystroke command menu for the serial console of a development
//! board. A key selects an entry from a fixed table; the entry's action runs
//! with the argument bound in the table and may block to read a typed
//! integer, float, string or date from the same stream.
//!
//! # Architecture
//!
//! - [`ActionRegistry`]: ordered, immutable table of [`MenuEntry`] values
//! - [`dispatch::run_once`]: reads one key, clears the line, runs the entry
//! - [`handlers`]: the built-in actions
//! - [`HeartbeatTask`]: duty-cycle blinker for an indicator line
//! - [`MainLoop`]: cooperative tick of dispatch plus heartbeat
//!
//! Hardware is reached only through the traits in [`channel`] and
//! [`datetime::TimeService`], so the same loop runs on a serial port or on
//! a simulated board.
//!
//! # Example
//!
//! ```rust
//! use menu_core::ActionRegistry;
//!
//! let registry = ActionRegistry::standard();
//! let entry = registry.lookup(b'h').unwrap();
//! assert_eq!(entry.label, "[h] Say Hello");
//! assert_eq!(entry.arg, "Guten Tag");
//! assert!(registry.lookup(b'?').is_none());
//! ```

pub mod channel;
pub mod config;
pub mod datetime;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod heartbeat;
pub mod menu;
pub mod registry;

pub use channel::{Clock, IndicatorLine, InputChannel, OutputChannel, CLEAR_LINE};
pub use config::{HeartbeatConfig, MenuConfig};
pub use datetime::{BrokenDownTime, DateFields, TimeService};
pub use dispatch::Dispatch;
pub use error::MenuError;
pub use handlers::Session;
pub use heartbeat::{heartbeat_level, HeartbeatState, HeartbeatTask};
pub use menu::{Board, MainLoop};
pub use registry::{Action, ActionRegistry, MenuEntry, STANDARD_MENU};

//! Serial Menu Simulation Library
//!
//! This crate provides a virtual board for running the command menu without
//! hardware. It includes:
//!
//! - **VirtualClock**: shared millisecond clock; delays advance it instantly
//! - **VirtualSerial**: input bytes scheduled at virtual arrival times, with
//!   inactivity timeouts measured on the virtual clock
//! - **VirtualLed**: indicator line that records every change of level
//! - **VirtualRtc**: wall clock running on virtual time
//!
//! # Example
//!
//! ```rust
//! use menu_sim::SimBoard;
//!
//! let sim = SimBoard::new();
//! let mut menu = sim.standard_loop().unwrap();
//!
//! sim.serial.send(b"h");
//! menu.tick().unwrap();
//!
//! let output = sim.serial.take_output_text();
//! assert!(output.ends_with("Guten Tag"));
//! ```

pub mod board;
pub mod clock;
pub mod led;
pub mod rtc;
pub mod serial;

pub use board::SimBoard;
pub use clock::VirtualClock;
pub use led::VirtualLed;
pub use rtc::VirtualRtc;
pub use serial::{VirtualSerial, VirtualSerialTx};

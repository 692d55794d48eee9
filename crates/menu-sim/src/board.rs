//! Simulated development board

use menu_core::{ActionRegistry, Board, MainLoop, MenuConfig, MenuError};

use crate::clock::VirtualClock;
use crate::led::VirtualLed;
use crate::rtc::VirtualRtc;
use crate::serial::VirtualSerial;

/// A board built from virtual parts that share one clock
///
/// The fields are handles: the menu loop receives clones through
/// [`SimBoard::board`] while the caller keeps these to type input, read
/// output and inspect the LED.
#[derive(Debug, Clone)]
pub struct SimBoard {
    /// Time shared by every part
    pub clock: VirtualClock,
    /// Console: type keys here and read the replies
    pub serial: VirtualSerial,
    /// Heartbeat LED
    pub led: VirtualLed,
    /// Real-time clock
    pub rtc: VirtualRtc,
}

impl SimBoard {
    pub fn new() -> Self {
        let clock = VirtualClock::new();
        Self {
            serial: VirtualSerial::new(clock.clone()),
            led: VirtualLed::new(clock.clone()),
            rtc: VirtualRtc::new(clock.clone()),
            clock,
        }
    }

    /// Collaborator set for a [`MainLoop`]
    pub fn board(&self) -> Board {
        Board {
            input: Box::new(self.serial.clone()),
            output: Box::new(self.serial.tx()),
            clock: Box::new(self.clock.clone()),
            rtc: Box::new(self.rtc.clone()),
            indicator: Box::new(self.led.clone()),
        }
    }

    /// Menu loop over this board with the given table and config
    pub fn main_loop(
        &self,
        registry: ActionRegistry,
        config: MenuConfig,
    ) -> Result<MainLoop, MenuError> {
        MainLoop::new(self.board(), registry, config)
    }

    /// Menu loop with the built-in table and default config
    pub fn standard_loop(&self) -> Result<MainLoop, MenuError> {
        self.main_loop(ActionRegistry::standard(), MenuConfig::default())
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

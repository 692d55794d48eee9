//! Host-side clock and real-time clock

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime, TimeDelta};
use menu_core::{Clock, TimeService};
use tracing::info;

/// Milliseconds since the console started
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Local time shifted by whatever was last set through the menu
///
/// The host's own clock is never changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRtc {
    offset: TimeDelta,
}

impl SystemRtc {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeService for SystemRtc {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local() + self.offset
    }

    fn adjust(&mut self, time: NaiveDateTime) {
        self.offset = time - Local::now().naive_local();
        info!("Menu clock offset from local time: {}s", self.offset.num_seconds());
    }
}

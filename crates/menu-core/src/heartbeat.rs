//! Heartbeat indicator
//!
//! A short pulse at the start of every period shows that the main loop is
//! alive. While a handler blocks on input the pulse freezes, which makes the
//! blocking behavior of data entry visible on the board.

use crate::channel::IndicatorLine;
use crate::config::HeartbeatConfig;

/// Whether the heartbeat task runs on each loop tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatState {
    enabled: bool,
}

impl HeartbeatState {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the flag and return the new value
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

impl Default for HeartbeatState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Level of the indicator at `now_ms` for the given duty cycle
///
/// A zero period never pulses.
pub fn heartbeat_level(now_ms: u64, period_ms: u64, pulse_width_ms: u64) -> bool {
    period_ms != 0 && now_ms % period_ms < pulse_width_ms
}

/// Duty-cycle generator driving an indicator line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatTask {
    period_ms: u64,
    pulse_width_ms: u64,
}

impl HeartbeatTask {
    pub fn new(period_ms: u64, pulse_width_ms: u64) -> Self {
        Self {
            period_ms,
            pulse_width_ms,
        }
    }

    pub fn from_config(config: &HeartbeatConfig) -> Self {
        Self::new(config.period_ms, config.pulse_width_ms)
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn pulse_width_ms(&self) -> u64 {
        self.pulse_width_ms
    }

    /// Set `pin` according to the elapsed time
    pub fn tick(&self, pin: &mut dyn IndicatorLine, now_ms: u64) {
        pin.set(heartbeat_level(now_ms, self.period_ms, self.pulse_width_ms));
    }
}

impl Default for HeartbeatTask {
    fn default() -> Self {
        Self::from_config(&HeartbeatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Pin {
        levels: Vec<bool>,
    }

    impl IndicatorLine for Pin {
        fn set(&mut self, high: bool) {
            self.levels.push(high);
        }
    }

    #[test]
    fn test_default_duty_cycle_edges() {
        assert!(heartbeat_level(0, 1000, 20));
        assert!(heartbeat_level(19, 1000, 20));
        assert!(!heartbeat_level(20, 1000, 20));
        assert!(!heartbeat_level(999, 1000, 20));
        assert!(heartbeat_level(1000, 1000, 20));
        assert!(heartbeat_level(5_010, 1000, 20));
    }

    #[test]
    fn test_zero_period_stays_low() {
        assert!(!heartbeat_level(0, 0, 20));
        assert!(!heartbeat_level(12345, 0, 0));
    }

    #[test]
    fn test_tick_drives_pin() {
        let task = HeartbeatTask::default();
        let mut pin = Pin::default();
        task.tick(&mut pin, 10);
        task.tick(&mut pin, 500);
        task.tick(&mut pin, 2_005);
        assert_eq!(pin.levels, vec![true, false, true]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut state = HeartbeatState::default();
        assert!(state.enabled());
        assert!(!state.toggle());
        assert!(state.toggle());
        assert!(state.enabled());
    }

    proptest! {
        #[test]
        fn level_matches_duty_cycle(now in any::<u64>()) {
            let level = heartbeat_level(now, 1000, 20);
            prop_assert_eq!(level, now % 1000 < 20);
        }

        #[test]
        fn level_is_periodic(now in 0u64..1_000_000, period in 1u64..10_000, width in 0u64..10_000) {
            prop_assert_eq!(
                heartbeat_level(now, period, width),
                heartbeat_level(now + period, period, width)
            );
        }
    }
}

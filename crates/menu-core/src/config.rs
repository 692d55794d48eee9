//! Menu timing and heartbeat configuration

use std::time::Duration;

use crate::error::MenuError;

/// Heartbeat indicator settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeartbeatConfig {
    /// Whether the indicator flashes right after startup
    pub enabled_at_start: bool,
    /// Length of one flash cycle in milliseconds
    pub period_ms: u64,
    /// Time the indicator stays on at the start of each cycle
    pub pulse_width_ms: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            enabled_at_start: true,
            period_ms: 1000,
            pulse_width_ms: 20,
        }
    }
}

/// Configuration of the menu loop
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuConfig {
    /// Pause before an entry handler starts reading, so the rest of the
    /// keystroke burst can arrive
    pub settle_delay_ms: u64,
    /// Inactivity timeout of the serial stream
    pub input_timeout_ms: u64,
    /// Multiplier applied to the timeout while a date and time is typed
    pub datetime_timeout_factor: u32,
    /// Serial line speed
    pub baud_rate: u32,
    /// Heartbeat indicator
    pub heartbeat: HeartbeatConfig,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 2000,
            input_timeout_ms: 1000,
            datetime_timeout_factor: 3,
            baud_rate: 115_200,
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

impl MenuConfig {
    /// Settle delay as a [`Duration`]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Inactivity timeout as a [`Duration`]
    pub fn input_timeout(&self) -> Duration {
        Duration::from_millis(self.input_timeout_ms)
    }

    /// Check the values that would make the loop misbehave
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.heartbeat.period_ms == 0 {
            return Err(MenuError::InvalidConfig(
                "heartbeat period must be greater than zero".into(),
            ));
        }
        if self.heartbeat.pulse_width_ms > self.heartbeat.period_ms {
            return Err(MenuError::InvalidConfig(format!(
                "heartbeat pulse width {}ms exceeds period {}ms",
                self.heartbeat.pulse_width_ms, self.heartbeat.period_ms
            )));
        }
        if self.datetime_timeout_factor == 0 {
            return Err(MenuError::InvalidConfig(
                "date/time timeout factor must be at least 1".into(),
            ));
        }
        if self.baud_rate == 0 {
            return Err(MenuError::InvalidConfig("baud rate must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MenuConfig::default();
        assert_eq!(config.settle_delay(), Duration::from_millis(2000));
        assert_eq!(config.input_timeout(), Duration::from_millis(1000));
        assert_eq!(config.datetime_timeout_factor, 3);
        assert_eq!(config.baud_rate, 115_200);
        assert!(config.heartbeat.enabled_at_start);
        assert_eq!(config.heartbeat.period_ms, 1000);
        assert_eq!(config.heartbeat.pulse_width_ms, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut config = MenuConfig::default();
        config.heartbeat.period_ms = 0;
        assert!(matches!(config.validate(), Err(MenuError::InvalidConfig(_))));
    }

    #[test]
    fn test_pulse_wider_than_period_rejected() {
        let mut config = MenuConfig::default();
        config.heartbeat.pulse_width_ms = 1001;
        assert!(matches!(config.validate(), Err(MenuError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_timeout_factor_rejected() {
        let config = MenuConfig {
            datetime_timeout_factor: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

//! Virtual board clock

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use menu_core::Clock;

/// Millisecond clock that only moves when told to
///
/// Clones share the same time, so a test can hold one handle while the menu
/// loop owns another. [`Clock::delay`] advances the time instantly.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now_ms: Arc<AtomicU64>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at `ms`
    pub fn starting_at(ms: u64) -> Self {
        let clock = Self::new();
        clock.set(ms);
        clock
    }

    pub fn now(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    pub fn set(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for VirtualClock {
    fn millis(&self) -> u64 {
        self.now()
    }

    fn delay(&mut self, duration: Duration) {
        self.advance(duration.as_millis() as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_time() {
        let a = VirtualClock::new();
        let mut b = a.clone();
        b.delay(Duration::from_millis(250));
        a.advance(50);
        assert_eq!(a.now(), 300);
        assert_eq!(b.millis(), 300);
    }
}

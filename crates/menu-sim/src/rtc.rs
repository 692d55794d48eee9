//! Virtual real-time clock

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDateTime, TimeDelta};
use menu_core::TimeService;
use tracing::debug;

use crate::clock::VirtualClock;

#[derive(Debug)]
struct RtcState {
    /// Wall time at `base_ms`
    base: NaiveDateTime,
    base_ms: u64,
}

/// Wall clock that runs on virtual board time
///
/// Like an RTC that was never set, it starts at the Unix epoch.
#[derive(Debug, Clone)]
pub struct VirtualRtc {
    clock: VirtualClock,
    state: Arc<Mutex<RtcState>>,
}

impl VirtualRtc {
    pub fn new(clock: VirtualClock) -> Self {
        Self::starting_at(clock, NaiveDateTime::default())
    }

    pub fn starting_at(clock: VirtualClock, time: NaiveDateTime) -> Self {
        let base_ms = clock.now();
        Self {
            clock,
            state: Arc::new(Mutex::new(RtcState {
                base: time,
                base_ms,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RtcState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TimeService for VirtualRtc {
    fn now(&self) -> NaiveDateTime {
        let state = self.lock();
        let elapsed = self.clock.now().saturating_sub(state.base_ms);
        state.base + TimeDelta::milliseconds(elapsed as i64)
    }

    fn adjust(&mut self, time: NaiveDateTime) {
        debug!("Virtual RTC set to {}", time);
        let now_ms = self.clock.now();
        let mut state = self.lock();
        state.base = time;
        state.base_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_runs_with_virtual_time() {
        let clock = VirtualClock::new();
        let mut rtc = VirtualRtc::new(clock.clone());
        assert_eq!(rtc.now(), NaiveDateTime::default());

        let set = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        clock.advance(7_000);
        rtc.adjust(set);
        clock.advance(61_000);
        assert_eq!(rtc.now(), set + TimeDelta::seconds(61));
    }
}

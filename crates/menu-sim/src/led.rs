//! Virtual indicator LED

use std::sync::{Arc, Mutex, MutexGuard};

use menu_core::IndicatorLine;

use crate::clock::VirtualClock;

#[derive(Debug, Default)]
struct LedState {
    level: bool,
    /// (virtual time, new level) for every change of level
    transitions: Vec<(u64, bool)>,
    writes: usize,
}

/// LED that remembers when it switched
#[derive(Debug, Clone)]
pub struct VirtualLed {
    clock: VirtualClock,
    state: Arc<Mutex<LedState>>,
}

impl VirtualLed {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            state: Arc::new(Mutex::new(LedState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LedState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_on(&self) -> bool {
        self.lock().level
    }

    /// Every change of level so far
    pub fn transitions(&self) -> Vec<(u64, bool)> {
        self.lock().transitions.clone()
    }

    /// Number of times the line was driven, changed or not
    pub fn writes(&self) -> usize {
        self.lock().writes
    }
}

impl IndicatorLine for VirtualLed {
    fn set(&mut self, high: bool) {
        let now = self.clock.now();
        let mut state = self.lock();
        state.writes += 1;
        if state.level != high {
            state.level = high;
            state.transitions.push((now, high));
        }
    }
}

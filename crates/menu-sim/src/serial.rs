//! Virtual serial stream
//!
//! Input bytes are scheduled at virtual arrival times. Blocking reads wait
//! for the next arrival by moving the shared [`VirtualClock`] forward, so a
//! read that would time out on hardware costs exactly one timeout of virtual
//! time here.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use menu_core::channel::DEFAULT_TIMEOUT;
use menu_core::InputChannel;
use tracing::{debug, trace};

use crate::clock::VirtualClock;

#[derive(Debug)]
struct SerialState {
    /// Input bytes with their arrival time, ordered by arrival
    pending: VecDeque<(u64, u8)>,
    /// Everything the board wrote
    output: Vec<u8>,
    timeout: Duration,
    /// Set once the link is gone
    fault: Option<io::ErrorKind>,
}

/// Simulated serial port: the board's receive side plus a capture of what
/// the board transmits
#[derive(Debug, Clone)]
pub struct VirtualSerial {
    clock: VirtualClock,
    state: Arc<Mutex<SerialState>>,
}

impl VirtualSerial {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            state: Arc::new(Mutex::new(SerialState {
                pending: VecDeque::new(),
                output: Vec::new(),
                timeout: DEFAULT_TIMEOUT,
                fault: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SerialState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Deliver `bytes` in one burst at virtual time `at_ms`
    pub fn send_at(&self, at_ms: u64, bytes: &[u8]) {
        let mut state = self.lock();
        // keep arrival order: insert after everything due at or before at_ms
        let idx = state.pending.partition_point(|(t, _)| *t <= at_ms);
        for (i, &b) in bytes.iter().enumerate() {
            state.pending.insert(idx + i, (at_ms, b));
        }
        trace!("Scheduled {} byte(s) at {}ms", bytes.len(), at_ms);
    }

    /// Deliver `bytes` in one burst right now
    pub fn send(&self, bytes: &[u8]) {
        self.send_at(self.clock.now(), bytes);
    }

    /// Deliver `bytes` one at a time, `gap_ms` apart, starting at `start_ms`
    pub fn type_at(&self, start_ms: u64, gap_ms: u64, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            self.send_at(start_ms + gap_ms * i as u64, std::slice::from_ref(b));
        }
    }

    /// Drop the link: pending input is lost, reads come back empty and
    /// writes fail with `kind`
    pub fn disconnect(&self, kind: io::ErrorKind) {
        let mut state = self.lock();
        state.pending.clear();
        state.fault = Some(kind);
        debug!("Serial link lost: {:?}", kind);
    }

    /// Bytes scheduled but not yet read
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Take everything written by the board so far
    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut self.lock().output)
    }

    /// Take the board's output as text
    pub fn take_output_text(&self) -> String {
        String::from_utf8_lossy(&self.take_output()).into_owned()
    }

    /// Writer the board uses as its output channel
    pub fn tx(&self) -> VirtualSerialTx {
        VirtualSerialTx {
            state: Arc::clone(&self.state),
        }
    }

    /// Arrival time of the next unread byte
    fn next_arrival(&self) -> Option<u64> {
        self.lock().pending.front().map(|(t, _)| *t)
    }

    /// Wait for the next byte within the timeout; true if one is due now
    fn wait_for_byte(&self) -> bool {
        let now = self.clock.now();
        let timeout = self.lock().timeout.as_millis() as u64;
        match self.next_arrival() {
            Some(at) if at <= now => true,
            Some(at) if at <= now + timeout => {
                self.clock.set(at);
                true
            }
            _ => {
                self.clock.advance(timeout);
                false
            }
        }
    }
}

impl InputChannel for VirtualSerial {
    fn available(&mut self) -> bool {
        self.next_arrival().is_some_and(|at| at <= self.clock.now())
    }

    fn read_byte(&mut self) -> Option<u8> {
        if !self.available() {
            return None;
        }
        self.lock().pending.pop_front().map(|(_, b)| b)
    }

    fn timed_read(&mut self) -> Option<u8> {
        if self.wait_for_byte() {
            self.lock().pending.pop_front().map(|(_, b)| b)
        } else {
            None
        }
    }

    fn timed_peek(&mut self) -> Option<u8> {
        if self.wait_for_byte() {
            self.lock().pending.front().map(|(_, b)| *b)
        } else {
            None
        }
    }

    fn timeout(&self) -> Duration {
        self.lock().timeout
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.lock().timeout = timeout;
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.lock().fault.map(io::Error::from)
    }
}

/// Transmit side of a [`VirtualSerial`]
#[derive(Debug, Clone)]
pub struct VirtualSerialTx {
    state: Arc<Mutex<SerialState>>,
}

impl io::Write for VirtualSerialTx {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(kind) = state.fault {
            return Err(kind.into());
        }
        state.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

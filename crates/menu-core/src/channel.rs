//! Board collaborators: serial input/output, clock and indicator line
//!
//! The menu only ever talks to hardware through these traits. A real serial
//! port, a simulated board and the unit-test fakes all implement them.
//!
//! # Inactivity timeout
//!
//! Every blocking read waits at most [`InputChannel::timeout`] for the *next*
//! byte. Each received byte restarts the wait, so [`InputChannel::read_bytes`]
//! returns only once the sender has been silent for a full timeout. This is
//! what lets a user type multi-digit or multi-field values.

use std::io::{self, Write};
use std::time::Duration;

/// Default inactivity timeout of a serial stream
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Width of the blank run used to erase the current terminal line
pub const CLEAR_LINE_WIDTH: usize = 80;

/// Carriage return, 80 blanks, carriage return
pub const CLEAR_LINE: &str = concat!(
    "\r",
    "                                        ",
    "                                        ",
    "\r"
);

/// Byte-oriented input side of a serial stream
pub trait InputChannel {
    /// True when at least one received byte is waiting to be read
    fn available(&mut self) -> bool;

    /// Read one already-received byte without waiting
    fn read_byte(&mut self) -> Option<u8>;

    /// Wait up to [`timeout`](Self::timeout) for the next byte and consume it
    fn timed_read(&mut self) -> Option<u8>;

    /// Wait up to [`timeout`](Self::timeout) for the next byte, leaving it unread
    fn timed_peek(&mut self) -> Option<u8>;

    /// Current inactivity timeout
    fn timeout(&self) -> Duration;

    /// Change the inactivity timeout for subsequent reads
    fn set_timeout(&mut self, timeout: Duration);

    /// Transport failure hidden behind an empty read, if any
    ///
    /// Reads report a dead link the same way as silence. The dispatcher asks
    /// here whenever it finds no input, so a failure ends the loop instead of
    /// looking idle forever.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }

    /// Collect raw bytes until the stream has been silent for one timeout
    fn read_bytes(&mut self) -> Vec<u8> {
        let mut bytes = Vec::new();
        while let Some(b) = self.timed_read() {
            bytes.push(b);
        }
        bytes
    }

    /// [`read_bytes`](Self::read_bytes) as text, invalid UTF-8 replaced
    fn read_string(&mut self) -> String {
        String::from_utf8_lossy(&self.read_bytes()).into_owned()
    }

    /// Parse the next integer token
    ///
    /// Bytes before the first digit or `-` are discarded. Returns `None` if
    /// the stream goes quiet before a token starts. The terminating byte is
    /// left in the stream.
    fn parse_int(&mut self) -> Option<i32> {
        let mut c = peek_next_digit(self, false)?;
        let mut negative = false;
        let mut value: i32 = 0;

        loop {
            match c {
                b'-' => negative = true,
                b'0'..=b'9' => {
                    value = value.wrapping_mul(10).wrapping_add(i32::from(c - b'0'));
                }
                _ => {}
            }
            self.read_byte();
            match self.timed_peek() {
                Some(next @ b'0'..=b'9') => c = next,
                _ => break,
            }
        }

        Some(if negative { value.wrapping_neg() } else { value })
    }

    /// Parse the next floating point token
    ///
    /// Same rules as [`parse_int`](Self::parse_int), with at most one `.`
    /// accepted inside the token.
    fn parse_float(&mut self) -> Option<f64> {
        let mut c = peek_next_digit(self, true)?;
        let mut negative = false;
        let mut fraction = false;
        let mut value = 0.0_f64;
        let mut scale = 1.0_f64;

        loop {
            match c {
                b'-' => negative = true,
                b'.' => fraction = true,
                b'0'..=b'9' => {
                    value = value * 10.0 + f64::from(c - b'0');
                    if fraction {
                        scale *= 10.0;
                    }
                }
                _ => {}
            }
            self.read_byte();
            match self.timed_peek() {
                Some(next @ b'0'..=b'9') => c = next,
                Some(b'.') if !fraction => c = b'.',
                _ => break,
            }
        }

        let value = value / scale;
        Some(if negative { -value } else { value })
    }
}

/// Discard bytes until one can start a numeric token
fn peek_next_digit<I: InputChannel + ?Sized>(input: &mut I, decimal: bool) -> Option<u8> {
    loop {
        let c = input.timed_peek()?;
        if c == b'-' || c.is_ascii_digit() || (decimal && c == b'.') {
            return Some(c);
        }
        input.read_byte();
    }
}

/// Output side of a serial stream
///
/// Anything that implements [`std::io::Write`] can be used.
pub trait OutputChannel: Write {
    /// Erase the current terminal line and return the cursor to column 0
    fn clear_line(&mut self) -> io::Result<()> {
        self.write_all(CLEAR_LINE.as_bytes())
    }
}

impl<W: Write> OutputChannel for W {}

/// Monotonic time source of the board
pub trait Clock {
    /// Milliseconds since the board started
    fn millis(&self) -> u64;

    /// Block the caller for `duration`
    fn delay(&mut self, duration: Duration);
}

/// A single digital output line, e.g. the built-in LED
pub trait IndicatorLine {
    /// Drive the line high (`true`) or low (`false`)
    fn set(&mut self, high: bool);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use super::InputChannel;

    /// Input that holds a fixed byte queue; an empty queue counts as a timeout
    pub struct QueueInput {
        pub bytes: VecDeque<u8>,
        pub timeout: Duration,
        pub timeouts_seen: Vec<Duration>,
        /// Reported once by `take_error`
        pub fault: Option<io::ErrorKind>,
    }

    impl QueueInput {
        pub fn new(data: &[u8]) -> Self {
            Self {
                bytes: data.iter().copied().collect(),
                timeout: super::DEFAULT_TIMEOUT,
                timeouts_seen: Vec::new(),
                fault: None,
            }
        }
    }

    impl InputChannel for QueueInput {
        fn available(&mut self) -> bool {
            !self.bytes.is_empty()
        }

        fn read_byte(&mut self) -> Option<u8> {
            self.bytes.pop_front()
        }

        fn timed_read(&mut self) -> Option<u8> {
            self.timeouts_seen.push(self.timeout);
            self.bytes.pop_front()
        }

        fn timed_peek(&mut self) -> Option<u8> {
            self.bytes.front().copied()
        }

        fn timeout(&self) -> Duration {
            self.timeout
        }

        fn set_timeout(&mut self, timeout: Duration) {
            self.timeout = timeout;
        }

        fn take_error(&mut self) -> Option<io::Error> {
            self.fault.take().map(io::Error::from)
        }
    }
}

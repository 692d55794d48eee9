//! Serial port adapters for the menu loop

use std::io::{self, Read};
use std::time::Duration;

use menu_core::channel::DEFAULT_TIMEOUT;
use menu_core::{Board, IndicatorLine, InputChannel};
use serialport::SerialPort;
use tracing::{debug, info, warn};

use crate::error::ConsoleError;
use crate::host::{SystemClock, SystemRtc};

/// Receive side of the console port
pub struct SerialInput {
    port: Box<dyn SerialPort>,
    /// Byte returned by a peek and not yet consumed
    peeked: Option<u8>,
    timeout: Duration,
    /// First transport failure since the last `take_error`
    fault: Option<io::Error>,
}

impl SerialInput {
    pub fn new(mut port: Box<dyn SerialPort>) -> Result<Self, ConsoleError> {
        port.set_timeout(DEFAULT_TIMEOUT)?;
        Ok(Self {
            port,
            peeked: None,
            timeout: DEFAULT_TIMEOUT,
            fault: None,
        })
    }

    /// Remember a failure so the menu loop can stop on it
    fn record(&mut self, error: io::Error) {
        if self.fault.is_none() {
            warn!("Serial port failed: {}", error);
            self.fault = Some(error);
        }
    }

    /// Block up to the port timeout for one byte
    fn fetch(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) => {
                None
            }
            Err(e) => {
                self.record(e);
                None
            }
        }
    }
}

impl InputChannel for SerialInput {
    fn available(&mut self) -> bool {
        if self.peeked.is_some() {
            return true;
        }
        match self.port.bytes_to_read() {
            Ok(n) => n > 0,
            Err(e) => {
                self.record(e.into());
                false
            }
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.available() {
            self.timed_read()
        } else {
            None
        }
    }

    fn timed_read(&mut self) -> Option<u8> {
        self.peeked.take().or_else(|| self.fetch())
    }

    fn timed_peek(&mut self) -> Option<u8> {
        if self.peeked.is_none() {
            self.peeked = self.fetch();
        }
        self.peeked
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn set_timeout(&mut self, timeout: Duration) {
        if let Err(e) = self.port.set_timeout(timeout) {
            self.record(e.into());
            return;
        }
        self.timeout = timeout;
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.fault.take()
    }
}

/// Heartbeat indicator on the port's DTR line
pub struct DtrIndicator {
    port: Box<dyn SerialPort>,
    level: Option<bool>,
}

impl DtrIndicator {
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        Self { port, level: None }
    }
}

impl IndicatorLine for DtrIndicator {
    fn set(&mut self, high: bool) {
        if self.level == Some(high) {
            return;
        }
        match self.port.write_data_terminal_ready(high) {
            Ok(()) => {
                debug!("DTR {}", if high { "high" } else { "low" });
                self.level = Some(high);
            }
            Err(e) => warn!("Failed to drive DTR: {}", e),
        }
    }
}

/// Open `port_name` and wire it up as a menu board
pub fn open_board(port_name: &str, baud_rate: u32) -> Result<Board, ConsoleError> {
    let port = serialport::new(port_name, baud_rate)
        .timeout(DEFAULT_TIMEOUT)
        .open()
        .map_err(|e| ConsoleError::OpenFailed {
            port: port_name.to_string(),
            reason: e.to_string(),
        })?;

    let output = port.try_clone()?;
    let dtr = port.try_clone()?;

    info!("Opened {} at {} baud", port_name, baud_rate);

    Ok(Board {
        input: Box::new(SerialInput::new(port)?),
        output: Box::new(output),
        clock: Box::new(SystemClock::new()),
        rtc: Box::new(SystemRtc::new()),
        indicator: Box::new(DtrIndicator::new(dtr)),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serialport::{ClearBuffer, DataBits, ErrorKind, FlowControl, Parity, StopBits};

    use super::*;

    /// Port that has been unplugged: every call fails
    struct UnpluggedPort;

    fn gone<T>() -> serialport::Result<T> {
        Err(serialport::Error::new(ErrorKind::NoDevice, "device removed"))
    }

    impl Read for UnpluggedPort {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "device removed"))
        }
    }

    impl Write for UnpluggedPort {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "device removed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SerialPort for UnpluggedPort {
        fn name(&self) -> Option<String> {
            Some("/dev/ttyTEST".into())
        }
        fn baud_rate(&self) -> serialport::Result<u32> {
            gone()
        }
        fn data_bits(&self) -> serialport::Result<DataBits> {
            gone()
        }
        fn flow_control(&self) -> serialport::Result<FlowControl> {
            gone()
        }
        fn parity(&self) -> serialport::Result<Parity> {
            gone()
        }
        fn stop_bits(&self) -> serialport::Result<StopBits> {
            gone()
        }
        fn timeout(&self) -> Duration {
            DEFAULT_TIMEOUT
        }
        fn set_baud_rate(&mut self, _: u32) -> serialport::Result<()> {
            gone()
        }
        fn set_data_bits(&mut self, _: DataBits) -> serialport::Result<()> {
            gone()
        }
        fn set_flow_control(&mut self, _: FlowControl) -> serialport::Result<()> {
            gone()
        }
        fn set_parity(&mut self, _: Parity) -> serialport::Result<()> {
            gone()
        }
        fn set_stop_bits(&mut self, _: StopBits) -> serialport::Result<()> {
            gone()
        }
        fn set_timeout(&mut self, _: Duration) -> serialport::Result<()> {
            // accepted so the input can be built before the unplug
            Ok(())
        }
        fn write_request_to_send(&mut self, _: bool) -> serialport::Result<()> {
            gone()
        }
        fn write_data_terminal_ready(&mut self, _: bool) -> serialport::Result<()> {
            gone()
        }
        fn read_clear_to_send(&mut self) -> serialport::Result<bool> {
            gone()
        }
        fn read_data_set_ready(&mut self) -> serialport::Result<bool> {
            gone()
        }
        fn read_ring_indicator(&mut self) -> serialport::Result<bool> {
            gone()
        }
        fn read_carrier_detect(&mut self) -> serialport::Result<bool> {
            gone()
        }
        fn bytes_to_read(&self) -> serialport::Result<u32> {
            gone()
        }
        fn bytes_to_write(&self) -> serialport::Result<u32> {
            gone()
        }
        fn clear(&self, _: ClearBuffer) -> serialport::Result<()> {
            gone()
        }
        fn try_clone(&self) -> serialport::Result<Box<dyn SerialPort>> {
            Ok(Box::new(UnpluggedPort))
        }
        fn set_break(&self) -> serialport::Result<()> {
            gone()
        }
        fn clear_break(&self) -> serialport::Result<()> {
            gone()
        }
    }

    #[test]
    fn test_unplugged_port_reports_error() {
        let mut input = SerialInput::new(Box::new(UnpluggedPort)).unwrap();
        assert!(!input.available());
        assert_eq!(input.timed_read(), None);

        // first failure wins, then it is cleared
        let err = input.take_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(input.take_error().is_none());
    }

    #[test]
    fn test_unplugged_port_ends_menu_loop() {
        let board = Board {
            input: Box::new(SerialInput::new(Box::new(UnpluggedPort)).unwrap()),
            output: Box::new(Vec::new()),
            clock: Box::new(SystemClock::new()),
            rtc: Box::new(SystemRtc::new()),
            indicator: Box::new(DtrIndicator::new(Box::new(UnpluggedPort))),
        };
        let mut menu =
            menu_core::MainLoop::new(board, menu_core::ActionRegistry::standard(), Default::default())
                .unwrap();
        assert!(matches!(menu.tick(), Err(menu_core::MenuError::Io(_))));
    }

    #[test]
    fn test_dtr_failure_keeps_level_unknown() {
        let mut dtr = DtrIndicator::new(Box::new(UnpluggedPort));
        dtr.set(true);
        assert_eq!(dtr.level, None);
    }
}

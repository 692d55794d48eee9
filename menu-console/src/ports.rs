//! Serial port selection

use serialport::{available_ports, SerialPortType};
use tracing::info;

use crate::error::ConsoleError;

/// Ports whose names contain one of these are never picked automatically
const SKIP_PATTERNS: &[&str] = &[
    // Bluetooth ports on macOS
    "Bluetooth",
    // Debug/logging ports
    "debug",
];

/// Information about a serial port
#[derive(Debug, Clone)]
pub struct SerialPortInfo {
    /// Port name (e.g., /dev/ttyUSB0, COM3)
    pub port: String,
    /// USB product string
    pub product: Option<String>,
}

impl SerialPortInfo {
    fn from_serialport(name: String, port_type: &SerialPortType) -> Self {
        let product = match port_type {
            SerialPortType::UsbPort(usb) => usb.product.clone(),
            _ => None,
        };
        Self {
            port: name,
            product,
        }
    }

    /// "ttyUSB0 (Product Name)" or just the port name
    pub fn display_label(&self) -> String {
        match &self.product {
            Some(product) => format!("{} ({})", self.port, product),
            None => self.port.clone(),
        }
    }
}

fn should_skip_port(port: &str) -> bool {
    SKIP_PATTERNS.iter().any(|pattern| port.contains(pattern))
}

/// Enumerate candidate serial ports
pub fn enumerate_ports() -> Result<Vec<SerialPortInfo>, ConsoleError> {
    info!("Enumerating serial ports...");
    let ports = available_ports().map_err(|e| ConsoleError::EnumerationFailed(e.to_string()))?;

    let result: Vec<_> = ports
        .into_iter()
        .map(|p| SerialPortInfo::from_serialport(p.port_name, &p.port_type))
        .filter(|p| !should_skip_port(&p.port))
        .collect();

    if result.is_empty() {
        info!("No serial ports found");
    } else {
        info!("Found {} serial port(s)", result.len());
        for port in &result {
            info!("  {}", port.display_label());
        }
    }

    Ok(result)
}

/// Use the configured port, or the first one found when none is configured
pub fn select_port(configured: &str) -> Result<String, ConsoleError> {
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }
    choose_first(enumerate_ports()?)
}

fn choose_first(ports: Vec<SerialPortInfo>) -> Result<String, ConsoleError> {
    let first = ports.into_iter().next().ok_or(ConsoleError::NoPorts)?;
    info!("Using {}", first.display_label());
    Ok(first.port)
}

//! Serial Command Menu Console
//!
//! Runs the single-keystroke menu against a host serial port. Whatever is
//! connected on the other end (a terminal emulator on a null-modem pair, or
//! a second machine) types the keys and sees the replies.

mod error;
mod host;
mod ports;
mod serial_io;
mod settings;

use std::time::Duration;

use anyhow::Context;
use error::ConsoleError;
use menu_core::{ActionRegistry, Dispatch, MainLoop};
use settings::Settings;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pause between polls while no key is waiting
const IDLE_POLL: Duration = Duration::from_millis(1);

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the serial session stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "climenu=info,menu_core=info,menu_sim=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting climenu");

    let settings = Settings::load();
    if Settings::settings_path().is_some_and(|p| !p.exists()) {
        if let Err(e) = settings.save() {
            warn!("Could not write default settings: {}", e);
        }
    }
    settings
        .menu
        .validate()
        .context("invalid menu settings")?;

    serve(settings).context("menu console stopped")
}

/// Open the configured port and run the menu until the link fails
fn serve(settings: Settings) -> Result<(), ConsoleError> {
    let port = ports::select_port(&settings.port)?;
    let board = serial_io::open_board(&port, settings.menu.baud_rate)?;

    let mut menu = MainLoop::new(board, ActionRegistry::standard(), settings.menu)?;
    menu.startup()?;
    loop {
        if menu.tick()? == Dispatch::Idle {
            std::thread::sleep(IDLE_POLL);
        }
    }
}

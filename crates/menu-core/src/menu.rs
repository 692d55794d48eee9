//! Cooperative main loop
//!
//! One tick handles at most one keystroke and then updates the heartbeat.
//! Nothing preempts a running action: while an entry handler waits for
//! input, the heartbeat indicator is frozen.

use tracing::info;

use crate::channel::{Clock, IndicatorLine, InputChannel, OutputChannel};
use crate::config::MenuConfig;
use crate::datetime::TimeService;
use crate::dispatch::{run_once, Dispatch};
use crate::error::MenuError;
use crate::handlers::{show_menu, Session};
use crate::heartbeat::{HeartbeatState, HeartbeatTask};
use crate::registry::ActionRegistry;

/// The collaborators a menu runs against
pub struct Board {
    /// Receive side of the serial console
    pub input: Box<dyn InputChannel>,
    /// Transmit side of the serial console
    pub output: Box<dyn OutputChannel>,
    /// Millisecond clock driving delays and the heartbeat
    pub clock: Box<dyn Clock>,
    /// Real-time clock read and set by the date entries
    pub rtc: Box<dyn TimeService>,
    /// Heartbeat line, usually the built-in LED
    pub indicator: Box<dyn IndicatorLine>,
}

/// Menu loop state: the board, the table and the heartbeat
pub struct MainLoop {
    board: Board,
    registry: ActionRegistry,
    heartbeat: HeartbeatState,
    task: HeartbeatTask,
    config: MenuConfig,
}

impl MainLoop {
    /// Validate `config` and apply its input timeout to the board
    pub fn new(
        mut board: Board,
        registry: ActionRegistry,
        config: MenuConfig,
    ) -> Result<Self, MenuError> {
        config.validate()?;
        board.input.set_timeout(config.input_timeout());

        Ok(Self {
            board,
            registry,
            heartbeat: HeartbeatState::new(config.heartbeat.enabled_at_start),
            task: HeartbeatTask::from_config(&config.heartbeat),
            config,
        })
    }

    pub fn heartbeat(&self) -> HeartbeatState {
        self.heartbeat
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    fn session(&mut self) -> Session<'_> {
        Session {
            input: &mut *self.board.input,
            output: &mut *self.board.output,
            clock: &mut *self.board.clock,
            rtc: &mut *self.board.rtc,
            indicator: &mut *self.board.indicator,
            heartbeat: &mut self.heartbeat,
            registry: &self.registry,
            config: &self.config,
        }
    }

    /// Print the menu once, as the board does after reset
    pub fn startup(&mut self) -> Result<(), MenuError> {
        info!(
            "Menu ready with {} entries, heartbeat {}",
            self.registry.len(),
            if self.heartbeat.enabled() { "on" } else { "off" }
        );
        show_menu(&mut self.session(), "")
    }

    /// Run one loop iteration
    pub fn tick(&mut self) -> Result<Dispatch, MenuError> {
        let outcome = run_once(&mut self.session())?;

        if self.heartbeat.enabled() {
            let now = self.board.clock.millis();
            self.task.tick(&mut *self.board.indicator, now);
        }

        Ok(outcome)
    }

    /// Show the menu, then tick until a collaborator fails
    pub fn run(&mut self) -> Result<(), MenuError> {
        self.startup()?;
        loop {
            self.tick()?;
        }
    }
}

// engine/src/automaton/session.rs
#![forbid(unsafe_code)]

use log::debug;

use crate::automaton::grid::{AutomatonConfig, AutomatonGrid};
use crate::error::GridError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LifeCommand {
    Toggle { x: usize, y: usize },
    Run,
    Stop,
    /// Advance exactly one generation, running or not.
    Step,
    Clear,
}

/// Run/pause state around an [`AutomatonGrid`].
///
/// The session has no clock. The driver calls [`LifeSession::tick`] whenever its
/// interval elapses; a paused session ignores ticks.
#[derive(Clone, Debug)]
pub struct LifeSession {
    pub grid: AutomatonGrid,
    running: bool,
    generation: u64,
}

impl LifeSession {
    pub fn new(cfg: AutomatonConfig) -> Result<Self, GridError> {
        Ok(Self::from_grid(AutomatonGrid::new(cfg)?))
    }

    pub fn from_grid(grid: AutomatonGrid) -> Self {
        Self {
            grid,
            running: false,
            generation: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn advance(&mut self) {
        self.grid.step();
        self.generation += 1;
    }

    pub fn apply(&mut self, cmd: LifeCommand) -> Result<(), GridError> {
        match cmd {
            LifeCommand::Toggle { x, y } => self.grid.toggle(x, y)?,
            LifeCommand::Run => {
                self.running = true;
                debug!("automaton running at generation {}", self.generation);
            }
            LifeCommand::Stop => {
                self.running = false;
                debug!("automaton paused at generation {}", self.generation);
            }
            LifeCommand::Step => self.advance(),
            LifeCommand::Clear => {
                self.grid.clear();
                self.generation = 0;
            }
        }
        Ok(())
    }

    /// Timer hook. Returns whether a generation was computed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.advance();
        true
    }
}

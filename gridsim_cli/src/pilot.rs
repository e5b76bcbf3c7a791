// gridsim_cli/src/pilot.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use gridsim_engine::{Direction, Rotation, StackCommand, StackingGame};

/// Pilot chooses the player command for the current frame.
///
/// Returns `None` to let the piece fall without input.
/// Object-safe so it can be used as `Box<dyn Pilot>`.
pub trait Pilot {
    fn choose_command(&mut self, g: &StackingGame) -> Option<StackCommand>;
}

/// Uniformly random shifts and turns, with an occasional hard drop.
pub struct RandomPilot {
    rng: StdRng,
    drop_rate: f64,
}

impl RandomPilot {
    pub fn new(seed: u64, drop_rate: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            drop_rate: drop_rate.clamp(0.0, 1.0),
        }
    }
}

impl Pilot for RandomPilot {
    fn choose_command(&mut self, g: &StackingGame) -> Option<StackCommand> {
        if g.game_over {
            return None;
        }
        if self.rng.gen_bool(self.drop_rate) {
            return Some(StackCommand::HardDrop);
        }
        match self.rng.gen_range(0..6) {
            0 => Some(StackCommand::Move(Direction::Left)),
            1 => Some(StackCommand::Move(Direction::Right)),
            2 => Some(StackCommand::Rotate(Rotation::Clockwise)),
            3 => Some(StackCommand::Rotate(Rotation::CounterClockwise)),
            _ => None,
        }
    }
}

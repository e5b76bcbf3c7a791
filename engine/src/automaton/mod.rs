// engine/src/automaton/mod.rs
#![forbid(unsafe_code)]

mod grid;
mod patterns;
mod session;

pub use grid::{AutomatonConfig, AutomatonGrid, CellState, LifeCell};
pub use patterns::{Pattern, PATTERNS};
pub use session::{LifeCommand, LifeSession};

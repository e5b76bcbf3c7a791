// engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod automaton;
pub mod constants;
pub mod error;
pub mod stacking;

// Re-export the bits the CLI driver needs:
pub use automaton::{
    AutomatonConfig, AutomatonGrid, CellState, LifeCell, LifeCommand, LifeSession, PATTERNS, Pattern,
};
pub use constants::{CELLS_PER_PIECE, MAX_COLS, MAX_ROWS};
pub use error::GridError;
pub use stacking::{
    Cell, CellView, Color, Direction, FallingPiece, Offset, Rotation, Shape, ShapeSequence, StackCommand,
    StackingConfig, StackingGame, StackingGrid, StepResult,
};

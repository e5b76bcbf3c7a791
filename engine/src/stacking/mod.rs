// engine/src/stacking/mod.rs
#![forbid(unsafe_code)]

mod game;
mod grid;
mod piece;
mod shapes;
mod spawner;

/**
 * Curated stacking-game API.
 *
 * Internal modules remain private; only stable items are re-exported here.
 */
pub use game::{CellView, StackCommand, StackingGame, StepResult};
pub use grid::{Cell, Color, StackingConfig, StackingGrid};
pub use piece::{Direction, FallingPiece, Offset, Rotation};
pub use shapes::Shape;
pub use spawner::{ShapeSequence, Spawner};

// engine/src/stacking/spawner.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::stacking::piece::FallingPiece;
use crate::stacking::shapes::Shape;

/// Order in which shapes reach the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShapeSequence {
    /// Independent uniform draw per spawn.
    Uniform,
    /// Shuffled runs of all seven shapes; no shape repeats within a run.
    Bag7,
}

/**
 * Spawn side of the stacking game.
 *
 * Owns the seeded shape stream and a one-shape preview, and places every new
 * piece at the spawn head `(width / 2 - 1, 0)` in spawn orientation. Two
 * spawners with the same seed, sequence and width produce identical pieces.
 */
#[derive(Clone)]
pub struct Spawner {
    sequence: ShapeSequence,
    rng: StdRng,
    head: (i32, i32),
    /// Remaining shapes of the current run, popped from the back.
    pending: Vec<Shape>,
    preview: Shape,
}

impl Spawner {
    /// `width` must already be validated (at least 4 columns).
    pub fn new(seed: u64, sequence: ShapeSequence, width: usize) -> Self {
        let mut s = Self {
            sequence,
            rng: StdRng::seed_from_u64(seed),
            head: ((width as i32) / 2 - 1, 0),
            pending: Vec::with_capacity(Shape::all().len()),
            preview: Shape::I,
        };
        s.preview = s.draw();
        s
    }

    #[inline]
    pub fn sequence(&self) -> ShapeSequence {
        self.sequence
    }

    /// Shape the next spawn will use.
    #[inline]
    pub fn preview(&self) -> Shape {
        self.preview
    }

    #[inline]
    pub fn spawn_head(&self) -> (i32, i32) {
        self.head
    }

    /// Consumes the preview and draws a new one.
    pub fn advance(&mut self) -> Shape {
        let upcoming = self.draw();
        std::mem::replace(&mut self.preview, upcoming)
    }

    /// Fresh piece for the next shape.
    pub fn spawn(&mut self) -> (Shape, FallingPiece) {
        let shape = self.advance();
        (shape, FallingPiece::new(self.head, shape.offsets(), shape.color()))
    }

    /// Reuses `piece` for the next shape. No collision check: the spawn rows
    /// sit in the hidden margin, which is empty whenever the game goes on.
    pub fn respawn(&mut self, piece: &mut FallingPiece) -> Shape {
        let shape = self.advance();
        piece.reset(self.head, shape.offsets(), shape.color());
        shape
    }

    fn draw(&mut self) -> Shape {
        match self.sequence {
            ShapeSequence::Uniform => {
                let all = Shape::all();
                all[self.rng.gen_range(0..all.len())]
            }
            ShapeSequence::Bag7 => loop {
                if let Some(shape) = self.pending.pop() {
                    return shape;
                }
                self.pending.extend_from_slice(Shape::all());
                self.pending.shuffle(&mut self.rng);
            },
        }
    }
}

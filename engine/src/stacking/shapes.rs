// engine/src/stacking/shapes.rs
#![forbid(unsafe_code)]

use crate::constants::CELLS_PER_PIECE;
use crate::stacking::grid::Color;
use crate::stacking::piece::Offset;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Shape {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Shape {
    pub fn all() -> &'static [Shape] {
        use Shape::*;
        &[I, O, T, S, Z, J, L]
    }

    pub fn glyph(self) -> char {
        use Shape::*;
        match self {
            I => 'I',
            O => 'O',
            T => 'T',
            S => 'S',
            Z => 'Z',
            J => 'J',
            L => 'L',
        }
    }

    pub fn color(self) -> Color {
        use Shape::*;
        match self {
            I => Color::Red,
            O => Color::Yellow,
            T => Color::Purple,
            S => Color::Green,
            Z => Color::Red,
            J => Color::Blue,
            L => Color::Orange,
        }
    }

    /// Spawn orientation as (dx, dy) offsets from the head cell, y growing downward.
    ///
    /// Every spawn orientation spans dx in -1..=2 and dy in 0..=1, so a head placed at
    /// `(width / 2 - 1, 0)` keeps the whole piece inside a 2-row hidden margin.
    pub fn offsets(self) -> [Offset; CELLS_PER_PIECE] {
        use Shape::*;
        match self {
            I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
            S => [(0, 0), (1, 0), (-1, 1), (0, 1)],
            Z => [(-1, 0), (0, 0), (0, 1), (1, 1)],
            J => [(-1, 0), (0, 0), (1, 0), (1, 1)],
            L => [(-1, 0), (0, 0), (1, 0), (-1, 1)],
        }
    }
}

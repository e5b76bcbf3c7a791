// engine/src/stacking/piece.rs
#![forbid(unsafe_code)]

use crate::constants::CELLS_PER_PIECE;
use crate::error::GridError;
use crate::stacking::grid::{Color, StackingGrid};

/// (dx, dy) relative to the piece head; y grows downward.
pub type Offset = (i32, i32);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Quarter turn of one offset on a y-down grid.
    #[inline]
    pub fn apply(self, (dx, dy): Offset) -> Offset {
        match self {
            Rotation::Clockwise => (-dy, dx),
            Rotation::CounterClockwise => (dy, -dx),
        }
    }
}

/// The live piece: a head coordinate plus a fixed number of offsets.
///
/// The piece never stores the grid; every operation borrows it for the call.
/// Moves and rotations are all-or-nothing: a rejected candidate leaves the
/// piece exactly as it was.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FallingPiece {
    head: (i32, i32),
    offsets: [Offset; CELLS_PER_PIECE],
    color: Color,
    locked: bool,
}

impl FallingPiece {
    pub fn new(head: (i32, i32), offsets: [Offset; CELLS_PER_PIECE], color: Color) -> Self {
        Self {
            head,
            offsets,
            color,
            locked: false,
        }
    }

    #[inline]
    pub fn head(&self) -> (i32, i32) {
        self.head
    }

    #[inline]
    pub fn offsets(&self) -> &[Offset; CELLS_PER_PIECE] {
        &self.offsets
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// True once the piece has been written into the grid.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Absolute cells of the piece.
    pub fn cells(&self) -> [(i32, i32); CELLS_PER_PIECE] {
        Self::absolute(self.head, &self.offsets)
    }

    fn absolute(head: (i32, i32), offsets: &[Offset; CELLS_PER_PIECE]) -> [(i32, i32); CELLS_PER_PIECE] {
        let (hx, hy) = head;
        offsets.map(|(dx, dy)| (hx + dx, hy + dy))
    }

    fn fits(grid: &StackingGrid, head: (i32, i32), offsets: &[Offset; CELLS_PER_PIECE]) -> bool {
        Self::absolute(head, offsets)
            .iter()
            .all(|&(x, y)| !grid.is_occupied(x, y))
    }

    fn try_shift(&mut self, dx: i32, dy: i32, grid: &StackingGrid) -> bool {
        if self.locked {
            return false;
        }
        let head = (self.head.0 + dx, self.head.1 + dy);
        if !Self::fits(grid, head, &self.offsets) {
            return false;
        }
        self.head = head;
        true
    }

    /// Shifts one column left or right.
    pub fn try_move(&mut self, direction: Direction, grid: &StackingGrid) -> bool {
        self.try_shift(direction.dx(), 0, grid)
    }

    /// Shifts one row down. A failure is the caller's lock trigger.
    pub fn try_move_down(&mut self, grid: &StackingGrid) -> bool {
        self.try_shift(0, 1, grid)
    }

    /// Quarter turn about the head, validated against the complete rotated
    /// cell set. No wall kicks.
    pub fn rotate(&mut self, rotation: Rotation, grid: &StackingGrid) -> bool {
        if self.locked {
            return false;
        }
        let rotated = self.offsets.map(|o| rotation.apply(o));
        if !Self::fits(grid, self.head, &rotated) {
            return false;
        }
        self.offsets = rotated;
        true
    }

    /// Hard drop. Returns the number of rows fallen.
    pub fn force_down(&mut self, grid: &StackingGrid) -> u32 {
        let mut rows = 0u32;
        while self.try_move_down(grid) {
            rows += 1;
        }
        rows
    }

    /// Writes every cell into the grid with the piece color and consumes the piece.
    ///
    /// All cells are bounds-checked before anything is written, so a failed
    /// lock leaves the grid untouched.
    pub fn lock(&mut self, grid: &mut StackingGrid) -> Result<(), GridError> {
        if self.locked {
            return Ok(());
        }
        let cells = self.cells();
        if let Some(&(x, y)) = cells.iter().find(|&&(x, y)| !grid.in_bounds(x, y)) {
            return Err(GridError::coordinate(
                x as i64,
                y as i64,
                grid.width(),
                grid.height(),
            ));
        }
        for (x, y) in cells {
            grid.set_cell(x as usize, y as usize, self.color)?;
        }
        self.locked = true;
        Ok(())
    }

    /// Re-arms the piece in place with a new shape. Spawn validity is not checked
    /// here: top-out is detected on the grid after the previous lock.
    pub fn reset(&mut self, head: (i32, i32), offsets: [Offset; CELLS_PER_PIECE], color: Color) {
        self.head = head;
        self.offsets = offsets;
        self.color = color;
        self.locked = false;
    }
}

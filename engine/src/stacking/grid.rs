// engine/src/stacking/grid.rs
#![forbid(unsafe_code)]

use crate::constants::{DEFAULT_STACK_H, DEFAULT_STACK_W, DEFAULT_UPPER_BORDER, MAX_COLS, MAX_ROWS};
use crate::error::GridError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Color {
    pub fn all() -> &'static [Color] {
        use Color::*;
        &[Red, Blue, Green, Yellow, Purple, Orange]
    }

    pub fn glyph(self) -> char {
        use Color::*;
        match self {
            Red => 'R',
            Blue => 'B',
            Green => 'G',
            Yellow => 'Y',
            Purple => 'P',
            Orange => 'O',
        }
    }
}

/// A board cell is either empty or permanently settled with one color.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Settled(Color),
}

impl Cell {
    #[inline]
    pub fn is_settled(self) -> bool {
        matches!(self, Cell::Settled(_))
    }

    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Settled(c) => Some(c),
        }
    }
}

/// Board geometry, fixed once the grid is built.
///
/// `height` counts the hidden `upper_border` rows at the top of the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StackingConfig {
    pub width: usize,
    pub height: usize,
    pub upper_border: usize,
}

impl Default for StackingConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_STACK_W,
            height: DEFAULT_STACK_H,
            upper_border: DEFAULT_UPPER_BORDER,
        }
    }
}

impl StackingConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width == 0 || self.width > MAX_COLS || self.height == 0 || self.height > MAX_ROWS {
            return Err(GridError::InvalidDimensions {
                width: self.width,
                height: self.height,
                max_w: MAX_COLS,
                max_h: MAX_ROWS,
            });
        }
        if self.upper_border >= self.height {
            return Err(GridError::InvalidMargin {
                upper_border: self.upper_border,
                height: self.height,
                min: 0,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn visible_rows(&self) -> usize {
        self.height - self.upper_border
    }
}

/// Settled cells of the stacking board, row-major, row 0 on top.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StackingGrid {
    cfg: StackingConfig,
    cells: Vec<Cell>,
}

impl StackingGrid {
    pub fn new(cfg: StackingConfig) -> Result<Self, GridError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            cells: vec![Cell::Empty; cfg.width * cfg.height],
        })
    }

    #[inline]
    pub fn config(&self) -> StackingConfig {
        self.cfg
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cfg.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.cfg.height
    }

    #[inline]
    pub fn upper_border(&self) -> usize {
        self.cfg.upper_border
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.cfg.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cfg.width && (y as usize) < self.cfg.height
    }

    fn check_coord(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.cfg.width || y >= self.cfg.height {
            return Err(GridError::coordinate(
                x as i64,
                y as i64,
                self.cfg.width,
                self.cfg.height,
            ));
        }
        Ok(self.idx(x, y))
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.cfg.width && y < self.cfg.height {
            Some(self.cells[self.idx(x, y)])
        } else {
            None
        }
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.cfg.height {
            return None;
        }
        let w = self.cfg.width;
        Some(&self.cells[y * w..(y + 1) * w])
    }

    /// Collision probe. Anything outside the board counts as occupied so pieces
    /// can never leave it.
    #[inline]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.cells[self.idx(x as usize, y as usize)].is_settled()
    }

    /// Rows are counted from the top. Out-of-range rows are never full.
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .map(|r| r.iter().all(|c| c.is_settled()))
            .unwrap_or(false)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, color: Color) -> Result<(), GridError> {
        let i = self.check_coord(x, y)?;
        self.cells[i] = Cell::Settled(color);
        Ok(())
    }

    pub fn clear_cell(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        let i = self.check_coord(x, y)?;
        self.cells[i] = Cell::Empty;
        Ok(())
    }

    /// Removes the full rows `row..row + num_rows` and drops every row above
    /// `row` by `num_rows`. The top `num_rows` rows come out empty.
    ///
    /// The request is verified first; a rejected request leaves the grid untouched.
    pub fn clear_and_compact(&mut self, row: usize, num_rows: usize) -> Result<(), GridError> {
        let reject = |reason| GridError::InvalidCompactionRequest {
            row,
            num_rows,
            reason,
        };
        if num_rows == 0 {
            return Err(reject("empty row range"));
        }
        let end = match row.checked_add(num_rows) {
            Some(end) if end <= self.cfg.height => end,
            _ => return Err(reject("row range exceeds grid height")),
        };
        if !(row..end).all(|r| self.is_row_full(r)) {
            return Err(reject("row range is not completely settled"));
        }

        let w = self.cfg.width;
        self.cells.copy_within(0..row * w, num_rows * w);
        self.cells[..num_rows * w].fill(Cell::Empty);
        Ok(())
    }

    /// Detects every full row and compacts them all in a single bottom-up pass.
    /// Returns the number of rows removed.
    ///
    /// Non-adjacent full rows are handled in the same pass, so no surviving row
    /// is ever shifted twice.
    pub fn clear_full_rows(&mut self) -> u32 {
        let w = self.cfg.width;
        let mut cleared = 0u32;
        let mut write_row = self.cfg.height;

        for r in (0..self.cfg.height).rev() {
            if self.is_row_full(r) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != r {
                self.cells.copy_within(r * w..(r + 1) * w, write_row * w);
            }
        }

        self.cells[..write_row * w].fill(Cell::Empty);
        cleared
    }

    /// Top-out: any settled cell inside the hidden margin.
    pub fn check_lose(&self) -> bool {
        let w = self.cfg.width;
        self.cells[..self.cfg.upper_border * w]
            .iter()
            .any(|c| c.is_settled())
    }

    pub fn settled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_settled()).count()
    }
}

// engine/src/automaton/grid.rs
#![forbid(unsafe_code)]

use log::trace;
use rand::prelude::*;

use crate::constants::{DEFAULT_LIFE_H, DEFAULT_LIFE_W, MAX_COLS, MAX_ROWS};
use crate::error::GridError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AutomatonConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_LIFE_W,
            height: DEFAULT_LIFE_H,
        }
    }
}

impl AutomatonConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width == 0 || self.width > MAX_COLS || self.height == 0 || self.height > MAX_ROWS {
            return Err(GridError::InvalidDimensions {
                width: self.width,
                height: self.height,
                max_w: MAX_COLS,
                max_h: MAX_ROWS,
            });
        }
        Ok(())
    }
}

/// Simulation record for one cell.
///
/// `live_neighbors` is a per-step cache: it is only meaningful between a
/// `count_neighbors()` pass and the `apply_rule()` pass that consumes it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LifeCell {
    pub alive: bool,
    pub live_neighbors: u8,
}

/// Render-facing projection of a cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellState {
    Dead,
    Alive,
}

impl From<LifeCell> for CellState {
    fn from(c: LifeCell) -> Self {
        if c.alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Bounded two-state automaton (B3/S23). Edges do not wrap.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AutomatonGrid {
    cfg: AutomatonConfig,
    cells: Vec<LifeCell>,
}

impl AutomatonGrid {
    pub fn new(cfg: AutomatonConfig) -> Result<Self, GridError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            cells: vec![LifeCell::default(); cfg.width * cfg.height],
        })
    }

    #[inline]
    pub fn config(&self) -> AutomatonConfig {
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
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.cfg.width + x
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

    pub fn cell(&self, x: usize, y: usize) -> Option<LifeCell> {
        if x < self.cfg.width && y < self.cfg.height {
            Some(self.cells[self.idx(x, y)])
        } else {
            None
        }
    }

    /// Out-of-range coordinates read as dead.
    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).map(|c| c.alive).unwrap_or(false)
    }

    pub fn state(&self, x: usize, y: usize) -> Option<CellState> {
        self.cell(x, y).map(CellState::from)
    }

    /// Flips one cell. Meant to be called between steps.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<(), GridError> {
        let i = self.check_coord(x, y)?;
        self.cells[i].alive = !self.cells[i].alive;
        Ok(())
    }

    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) -> Result<(), GridError> {
        let i = self.check_coord(x, y)?;
        self.cells[i].alive = alive;
        Ok(())
    }

    /// Alive cells among the up-to-8 in-bounds neighbours of (x, y).
    fn count_at(&self, x: usize, y: usize) -> u8 {
        let x_lo = x.saturating_sub(1);
        let y_lo = y.saturating_sub(1);
        let x_hi = (x + 1).min(self.cfg.width - 1);
        let y_hi = (y + 1).min(self.cfg.height - 1);

        let mut n = 0u8;
        for ny in y_lo..=y_hi {
            for nx in x_lo..=x_hi {
                if (nx, ny) != (x, y) && self.cells[self.idx(nx, ny)].alive {
                    n += 1;
                }
            }
        }
        n
    }

    /// Phase 1: refresh every `live_neighbors` from the current alive flags.
    /// Alive flags are not touched.
    pub fn count_neighbors(&mut self) {
        for y in 0..self.cfg.height {
            for x in 0..self.cfg.width {
                let n = self.count_at(x, y);
                let i = self.idx(x, y);
                self.cells[i].live_neighbors = n;
            }
        }
    }

    /// Phase 2: B3/S23 using the counts from the preceding `count_neighbors()`.
    /// - alive with < 2 or > 3 neighbours dies
    /// - alive with 2 or 3 survives
    /// - dead with exactly 3 is born
    pub fn apply_rule(&mut self) {
        for c in self.cells.iter_mut() {
            c.alive = match (c.alive, c.live_neighbors) {
                (true, n) => n == 2 || n == 3,
                (false, n) => n == 3,
            };
        }
    }

    /// One generation: a full counting pass, then a full rule pass.
    pub fn step(&mut self) {
        self.count_neighbors();
        self.apply_rule();
        trace!("automaton step: population={}", self.population());
    }

    /// Back to an all-dead grid of the same dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(LifeCell::default());
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// Replaces the grid contents with random soup. `density` is clamped to [0, 1].
    pub fn randomize(&mut self, density: f64, seed: u64) {
        let p = density.clamp(0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(seed);
        for c in self.cells.iter_mut() {
            *c = LifeCell {
                alive: rng.gen_bool(p),
                live_neighbors: 0,
            };
        }
    }

    /// Every cell, row-major from the top.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        let w = self.cfg.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % w, i / w, CellState::from(c)))
    }

    pub fn render_ascii(&self) -> String {
        let w = self.cfg.width;
        let border = format!("+{}+\n", "-".repeat(w));
        let mut s = String::with_capacity((w + 3) * (self.cfg.height + 2));
        s.push_str(&border);
        for row in self.cells.chunks(w) {
            s.push('|');
            for c in row {
                s.push(if c.alive { '#' } else { ' ' });
            }
            s.push_str("|\n");
        }
        s.push_str(&border);
        s
    }
}

// engine/src/automaton/patterns.rs
#![forbid(unsafe_code)]

use crate::automaton::grid::AutomatonGrid;
use crate::error::GridError;

/// A named seed shape. Cells are (x, y) relative to the placement origin.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
];

impl Pattern {
    pub fn by_name(name: &str) -> Option<&'static Pattern> {
        let name = name.to_lowercase();
        PATTERNS.iter().find(|p| p.name == name)
    }

    /// (width, height) of the bounding box.
    pub fn extent(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(w, h), &(x, y)| {
            (w.max(x + 1), h.max(y + 1))
        })
    }
}

impl AutomatonGrid {
    /// Sets the pattern's cells alive with its top-left corner at `origin`.
    /// All-or-nothing: if any cell falls outside the grid nothing is written.
    pub fn place(&mut self, pattern: &Pattern, origin: (usize, usize)) -> Result<(), GridError> {
        let (ox, oy) = origin;
        let (pw, ph) = pattern.extent();
        let fits = |o: usize, extent: usize, bound: usize| {
            o.checked_add(extent).is_some_and(|end| end <= bound)
        };
        if !fits(ox, pw, self.width()) || !fits(oy, ph, self.height()) {
            return Err(GridError::coordinate(
                i64::try_from(ox).unwrap_or(i64::MAX),
                i64::try_from(oy).unwrap_or(i64::MAX),
                self.width(),
                self.height(),
            ));
        }
        for &(x, y) in pattern.cells {
            self.set_alive(ox + x, oy + y, true)?;
        }
        Ok(())
    }
}

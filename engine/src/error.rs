// engine/src/error.rs
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised by the grid engines.
///
/// Occupancy queries never fail: an out-of-bounds probe is simply "occupied".
/// Only direct mutators, compaction requests and construction can be rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum GridError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    InvalidCoordinate {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("cannot compact {num_rows} row(s) starting at row {row}: {reason}")]
    InvalidCompactionRequest {
        row: usize,
        num_rows: usize,
        reason: &'static str,
    },

    #[error("grid dimensions {width}x{height} outside 1..={max_w} x 1..={max_h}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        max_w: usize,
        max_h: usize,
    },

    #[error("board width {width} is narrower than the {min} columns a spawned piece needs")]
    BoardTooNarrow { width: usize, min: usize },

    #[error("hidden margin of {upper_border} rows is invalid for height {height} (need >= {min} margin rows and one visible row)")]
    InvalidMargin {
        upper_border: usize,
        height: usize,
        min: usize,
    },
}

impl GridError {
    pub(crate) fn coordinate(x: i64, y: i64, width: usize, height: usize) -> Self {
        GridError::InvalidCoordinate {
            x,
            y,
            width,
            height,
        }
    }
}

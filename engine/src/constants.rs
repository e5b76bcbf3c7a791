// engine/src/constants.rs
#![forbid(unsafe_code)]

/// Upper bound on configurable grid columns (both engines).
pub const MAX_COLS: usize = 40;
/// Upper bound on configurable grid rows, hidden margin included.
pub const MAX_ROWS: usize = 70;

/// Every falling piece is made of exactly this many cells.
pub const CELLS_PER_PIECE: usize = 4;

/// Spawn orientations occupy rows `0..SPAWN_ROWS` relative to the spawn head.
pub const SPAWN_ROWS: usize = 2;
/// Narrowest board a `StackingGame` accepts (the I piece lies flat at spawn).
pub const MIN_GAME_WIDTH: usize = 4;

pub const DEFAULT_STACK_W: usize = 10;
pub const DEFAULT_STACK_H: usize = 22;

/**
 * Default hidden rows above the visible playfield.
 * - Must be >= SPAWN_ROWS so a freshly spawned piece lies entirely inside it.
 * - A settled cell inside this margin after a lock means top-out.
 */
pub const DEFAULT_UPPER_BORDER: usize = SPAWN_ROWS;

pub const DEFAULT_LIFE_W: usize = 40;
pub const DEFAULT_LIFE_H: usize = 40;

/// Score awarded per cleared row. There is no level multiplier.
pub const SCORE_PER_ROW: u64 = 100;

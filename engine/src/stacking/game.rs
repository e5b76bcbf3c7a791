// engine/src/stacking/game.rs
#![forbid(unsafe_code)]

use log::{debug, info, warn};

use crate::constants::{MIN_GAME_WIDTH, SCORE_PER_ROW, SPAWN_ROWS};
use crate::error::GridError;
use crate::stacking::grid::{Cell, Color, StackingConfig, StackingGrid};
use crate::stacking::piece::{Direction, FallingPiece, Rotation};
use crate::stacking::shapes::Shape;
use crate::stacking::spawner::{ShapeSequence, Spawner};

/// Player-facing commands. Gravity is not a command: see [`StackingGame::tick`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StackCommand {
    Move(Direction),
    Rotate(Rotation),
    /// One row down; locks the piece if it cannot fall.
    SoftDrop,
    /// Fall until blocked, then lock.
    HardDrop,
}

/// Render-facing view of one board cell: settled stack and live piece combined.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellView {
    Empty,
    Settled(Color),
    Falling(Color),
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StepResult {
    /// True top-out (hidden margin occupied) OR engine already in game_over.
    pub terminated: bool,
    /// The piece was written into the grid during this step.
    pub locked: bool,
    pub cleared_lines: u32,
    /// True iff the command was blocked; in that case the transition is a no-op.
    pub rejected: bool,
}

impl StepResult {
    fn terminated() -> Self {
        Self {
            terminated: true,
            ..Self::default()
        }
    }

    fn rejected() -> Self {
        Self {
            rejected: true,
            ..Self::default()
        }
    }
}

/// One stacking-game session: settled grid, live piece and shape stream.
///
/// Lifecycle per piece:
/// `spawned -> (move/rotate)* -> locked -> row clear -> next spawned`,
/// or `locked -> top-out` (latched in `game_over`).
#[derive(Clone)]
pub struct StackingGame {
    grid: StackingGrid,
    piece: FallingPiece,
    spawner: Spawner,

    pub active: Shape,

    pub score: u64,
    pub lines_cleared: u64,
    pub pieces_locked: u64,
    pub ticks: u64,
    pub game_over: bool,
}

impl StackingGame {
    /// Default board, uniform IID shape stream.
    pub fn new(seed: u64) -> Result<Self, GridError> {
        Self::with_sequence(StackingConfig::default(), seed, ShapeSequence::Uniform)
    }

    pub fn with_sequence(
        cfg: StackingConfig,
        seed: u64,
        sequence: ShapeSequence,
    ) -> Result<Self, GridError> {
        cfg.validate()?;
        if cfg.width < MIN_GAME_WIDTH {
            return Err(GridError::BoardTooNarrow {
                width: cfg.width,
                min: MIN_GAME_WIDTH,
            });
        }
        if cfg.upper_border < SPAWN_ROWS {
            return Err(GridError::InvalidMargin {
                upper_border: cfg.upper_border,
                height: cfg.height,
                min: SPAWN_ROWS,
            });
        }

        let grid = StackingGrid::new(cfg)?;
        let mut spawner = Spawner::new(seed, sequence, cfg.width);
        let (active, piece) = spawner.spawn();

        Ok(Self {
            grid,
            piece,
            spawner,
            active,
            score: 0,
            lines_cleared: 0,
            pieces_locked: 0,
            ticks: 0,
            game_over: false,
        })
    }

    pub fn sequence(&self) -> ShapeSequence {
        self.spawner.sequence()
    }

    /// Shape that spawns after the live piece locks.
    #[inline]
    pub fn next(&self) -> Shape {
        self.spawner.preview()
    }

    #[inline]
    pub fn grid(&self) -> &StackingGrid {
        &self.grid
    }

    /// Direct access for setting up positions. Settling cells under the live
    /// piece breaks its "over empty cells" invariant; that is the caller's problem.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut StackingGrid {
        &mut self.grid
    }

    #[inline]
    pub fn piece(&self) -> &FallingPiece {
        &self.piece
    }

    fn spawn_next(&mut self) {
        self.active = self.spawner.respawn(&mut self.piece);
        debug!(
            "spawned {} (next {}) after {} locks",
            self.active.glyph(),
            self.spawner.preview().glyph(),
            self.pieces_locked
        );
    }

    /// Lock the live piece, clear completed rows in one pass, then either latch
    /// top-out or spawn the next piece.
    fn lock_and_advance(&mut self) -> Result<StepResult, GridError> {
        self.piece.lock(&mut self.grid)?;
        self.pieces_locked += 1;

        let cleared = self.grid.clear_full_rows();
        self.lines_cleared += u64::from(cleared);
        self.score += SCORE_PER_ROW * u64::from(cleared);
        debug!(
            "locked {} at {:?}, cleared {} row(s)",
            self.active.glyph(),
            self.piece.head(),
            cleared
        );

        if self.grid.check_lose() {
            self.game_over = true;
            info!(
                "top-out after {} pieces: score={} lines={}",
                self.pieces_locked, self.score, self.lines_cleared
            );
            return Ok(StepResult {
                terminated: true,
                locked: true,
                cleared_lines: cleared,
                rejected: false,
            });
        }

        self.spawn_next();
        Ok(StepResult {
            terminated: false,
            locked: true,
            cleared_lines: cleared,
            rejected: false,
        })
    }

    /// Gravity step, driven by the caller's timer.
    pub fn tick(&mut self) -> Result<StepResult, GridError> {
        if self.game_over {
            return Ok(StepResult::terminated());
        }
        self.ticks += 1;
        if self.piece.try_move_down(&self.grid) {
            return Ok(StepResult::default());
        }
        self.lock_and_advance()
    }

    /// Applies one player command to the live piece.
    ///
    /// Blocked moves/rotations are no-ops reported with `rejected=true`.
    pub fn apply(&mut self, cmd: StackCommand) -> Result<StepResult, GridError> {
        if self.game_over {
            return Ok(StepResult::terminated());
        }

        match cmd {
            StackCommand::Move(dir) => {
                if self.piece.try_move(dir, &self.grid) {
                    Ok(StepResult::default())
                } else {
                    Ok(StepResult::rejected())
                }
            }
            StackCommand::Rotate(rot) => {
                if self.piece.rotate(rot, &self.grid) {
                    Ok(StepResult::default())
                } else {
                    Ok(StepResult::rejected())
                }
            }
            StackCommand::SoftDrop => {
                if self.piece.try_move_down(&self.grid) {
                    Ok(StepResult::default())
                } else {
                    self.lock_and_advance()
                }
            }
            StackCommand::HardDrop => {
                let rows = self.piece.force_down(&self.grid);
                debug!("hard drop fell {rows} row(s)");
                self.lock_and_advance()
            }
        }
    }

    /// Composite view of one cell. Out-of-range coordinates read as empty.
    pub fn view_cell(&self, x: usize, y: usize) -> CellView {
        match self.grid.cell(x, y) {
            Some(Cell::Settled(c)) => CellView::Settled(c),
            Some(Cell::Empty) => {
                let live = !self.piece.is_locked()
                    && self
                        .piece
                        .cells()
                        .iter()
                        .any(|&(px, py)| px == x as i32 && py == y as i32);
                if live {
                    CellView::Falling(self.piece.color())
                } else {
                    CellView::Empty
                }
            }
            None => {
                warn!("view_cell({x}, {y}) outside the board");
                CellView::Empty
            }
        }
    }

    /// Every board cell (hidden margin included), row-major from the top.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellView)> + '_ {
        let w = self.grid.width();
        (0..self.grid.height())
            .flat_map(move |y| (0..w).map(move |x| (x, y)))
            .map(move |(x, y)| (x, y, self.view_cell(x, y)))
    }

    pub fn render_ascii(&self) -> String {
        let w = self.grid.width();
        let border = format!("+{}+\n", "-".repeat(w));

        let mut s = String::new();
        s.push_str(&border);
        for y in self.grid.upper_border()..self.grid.height() {
            s.push('|');
            for x in 0..w {
                s.push(match self.view_cell(x, y) {
                    CellView::Empty => ' ',
                    CellView::Settled(c) => c.glyph(),
                    CellView::Falling(_) => '#',
                });
            }
            s.push_str("|\n");
        }
        s.push_str(&border);
        s.push_str(&format!(
            "sequence={:?} active={} next={} score={} lines={} pieces={} over={}\n",
            self.spawner.sequence(),
            self.active.glyph(),
            self.spawner.preview().glyph(),
            self.score,
            self.lines_cleared,
            self.pieces_locked,
            self.game_over
        ));
        s
    }
}

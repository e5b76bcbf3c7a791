// engine/tests/stacking_characterization.rs
#![forbid(unsafe_code)]

/**
 * Stacking engine characterization tests.
 *
 * Purpose:
 * - Lock in observable grid/piece behavior: row detection, compaction,
 *   collision, rotation, locking and top-out.
 * - Cover the game session built on top (command handling, gravity, row
 *   clearing, game-over latch, shape stream semantics).
 *
 * How the tests work:
 * - Small hand-built boards with known contents; pieces are placed with
 *   explicit offsets so outcomes do not depend on the shape stream.
 * - Session tests only assert public API contracts.
 */
use gridsim_engine::stacking::Spawner;
use gridsim_engine::{
    Cell, CellView, Color, Direction, FallingPiece, GridError, Rotation, Shape, ShapeSequence,
    StackCommand, StackingConfig, StackingGame, StackingGrid, StepResult,
};

const T_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, 0), (1, 0), (0, 1)];
const I_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, 0), (1, 0), (2, 0)];

fn grid(width: usize, height: usize, upper_border: usize) -> StackingGrid {
    StackingGrid::new(StackingConfig {
        width,
        height,
        upper_border,
    })
    .unwrap()
}

fn fill_row(g: &mut StackingGrid, y: usize, color: Color) {
    for x in 0..g.width() {
        g.set_cell(x, y, color).unwrap();
    }
}

fn sorted_cells(p: &FallingPiece) -> Vec<(i32, i32)> {
    let mut v = p.cells().to_vec();
    v.sort_unstable();
    v
}

// -----------------------------------------------------------------------------
// Grid
// -----------------------------------------------------------------------------

#[test]
fn new_grid_is_empty_with_fixed_bounds() {
    let g = grid(7, 12, 3);
    assert_eq!((g.width(), g.height(), g.upper_border()), (7, 12, 3));
    assert_eq!(g.settled_count(), 0);
    for y in 0..12 {
        assert!(!g.is_row_full(y));
        for x in 0..7 {
            assert_eq!(g.cell(x, y), Some(Cell::Empty));
        }
    }
    assert!(!g.check_lose());
}

#[test]
fn row_is_full_only_when_every_column_is_settled() {
    let mut g = grid(4, 6, 2);
    for x in 0..3 {
        g.set_cell(x, 5, Color::Red).unwrap();
        assert!(!g.is_row_full(5));
    }
    g.set_cell(3, 5, Color::Blue).unwrap();
    assert!(g.is_row_full(5));

    g.clear_cell(1, 5).unwrap();
    assert!(!g.is_row_full(5));
    assert!(!g.is_row_full(99));
}

#[test]
fn out_of_bounds_is_occupied_for_collision() {
    let mut g = grid(4, 6, 2);
    assert!(g.is_occupied(-1, 0));
    assert!(g.is_occupied(4, 0));
    assert!(g.is_occupied(0, -1));
    assert!(g.is_occupied(0, 6));
    assert!(!g.is_occupied(0, 0));
    g.set_cell(2, 3, Color::Green).unwrap();
    assert!(g.is_occupied(2, 3));
}

#[test]
fn direct_mutators_reject_out_of_bounds() {
    let mut g = grid(4, 6, 2);
    let before = g.clone();
    assert!(matches!(
        g.set_cell(4, 0, Color::Red),
        Err(GridError::InvalidCoordinate { x: 4, y: 0, .. })
    ));
    assert!(matches!(
        g.clear_cell(0, 6),
        Err(GridError::InvalidCoordinate { .. })
    ));
    assert_eq!(g, before);
}

#[test]
fn compaction_shifts_rows_above_by_the_cleared_count() {
    let mut g = grid(4, 8, 2);
    fill_row(&mut g, 6, Color::Red);
    fill_row(&mut g, 7, Color::Red);
    g.set_cell(2, 5, Color::Blue).unwrap();
    g.set_cell(0, 3, Color::Purple).unwrap();

    g.clear_and_compact(6, 2).unwrap();

    assert_eq!(g.cell(2, 7), Some(Cell::Settled(Color::Blue)));
    assert_eq!(g.cell(0, 5), Some(Cell::Settled(Color::Purple)));
    assert_eq!(g.settled_count(), 2);
    for y in 0..2 {
        assert!(g.row(y).unwrap().iter().all(|c| *c == Cell::Empty));
    }
}

#[test]
fn compaction_leaves_rows_below_the_cleared_range_alone() {
    let mut g = grid(3, 7, 2);
    fill_row(&mut g, 4, Color::Green);
    g.set_cell(1, 6, Color::Orange).unwrap();
    g.set_cell(0, 5, Color::Yellow).unwrap();
    g.set_cell(2, 3, Color::Red).unwrap();

    g.clear_and_compact(4, 1).unwrap();

    assert_eq!(g.cell(1, 6), Some(Cell::Settled(Color::Orange)));
    assert_eq!(g.cell(0, 5), Some(Cell::Settled(Color::Yellow)));
    assert_eq!(g.cell(2, 4), Some(Cell::Settled(Color::Red)));
    assert_eq!(g.cell(2, 3), Some(Cell::Empty));
}

#[test]
fn invalid_compaction_requests_are_rejected_without_changes() {
    let mut g = grid(4, 6, 2);
    fill_row(&mut g, 5, Color::Red);
    g.set_cell(0, 4, Color::Blue).unwrap();
    let before = g.clone();

    for (row, n) in [(4, 2), (5, 0), (5, 2), (6, 1)] {
        assert!(matches!(
            g.clear_and_compact(row, n),
            Err(GridError::InvalidCompactionRequest { .. })
        ));
        assert_eq!(g, before);
    }
}

#[test]
fn compaction_ranges_that_overflow_are_rejected() {
    let mut g = grid(4, 6, 2);
    fill_row(&mut g, 5, Color::Red);
    let before = g.clone();

    for (row, n) in [(1, usize::MAX), (usize::MAX, 1), (usize::MAX, usize::MAX)] {
        assert!(matches!(
            g.clear_and_compact(row, n),
            Err(GridError::InvalidCompactionRequest { .. })
        ));
    }
    assert_eq!(g, before);
}

#[test]
fn lose_checks_only_the_hidden_margin() {
    let mut g = grid(4, 6, 2);
    g.set_cell(0, 2, Color::Red).unwrap();
    assert!(!g.check_lose());
    g.set_cell(3, 1, Color::Red).unwrap();
    assert!(g.check_lose());
}

// -----------------------------------------------------------------------------
// Piece
// -----------------------------------------------------------------------------

#[test]
fn blocked_moves_leave_the_piece_unchanged() {
    let mut g = grid(6, 8, 2);
    let mut p = FallingPiece::new((1, 3), T_OFFSETS, Color::Purple);

    let before = p.clone();
    assert!(!p.try_move(Direction::Left, &g));
    assert_eq!(p, before);

    g.set_cell(3, 3, Color::Red).unwrap();
    let before = p.clone();
    assert!(!p.try_move(Direction::Right, &g));
    assert_eq!(p, before);

    g.set_cell(1, 5, Color::Red).unwrap();
    assert!(!p.try_move_down(&g));
    assert_eq!(p, before);
}

#[test]
fn rotation_is_validated_against_the_whole_rotated_set() {
    let mut g = grid(6, 8, 2);
    let mut p = FallingPiece::new((2, 4), T_OFFSETS, Color::Purple);

    // Only the rotated image of (-1, 0) -> (0, -1) lands on this cell.
    g.set_cell(2, 3, Color::Red).unwrap();
    let before = p.clone();
    assert!(!p.rotate(Rotation::Clockwise, &g));
    assert_eq!(p, before);

    // Against the floor.
    let g = grid(6, 8, 2);
    let mut flat = FallingPiece::new((2, 7), I_OFFSETS, Color::Red);
    let before = flat.clone();
    assert!(!flat.rotate(Rotation::Clockwise, &g));
    assert!(!flat.rotate(Rotation::CounterClockwise, &g));
    assert_eq!(flat, before);
}

#[test]
fn four_quarter_turns_restore_the_cell_set() {
    let g = grid(8, 10, 2);
    for shape in Shape::all() {
        for rot in [Rotation::Clockwise, Rotation::CounterClockwise] {
            let mut p = FallingPiece::new((4, 5), shape.offsets(), shape.color());
            let start = sorted_cells(&p);
            for _ in 0..4 {
                assert!(p.rotate(rot, &g));
            }
            assert_eq!(sorted_cells(&p), start);
        }
    }
}

#[test]
fn opposite_rotations_cancel() {
    let g = grid(8, 10, 2);
    let mut p = FallingPiece::new((4, 5), Shape::L.offsets(), Color::Orange);
    let start = p.clone();
    assert!(p.rotate(Rotation::Clockwise, &g));
    assert_ne!(p, start);
    assert!(p.rotate(Rotation::CounterClockwise, &g));
    assert_eq!(p, start);
}

#[test]
fn force_down_falls_until_blocked() {
    let mut g = grid(4, 8, 2);
    g.set_cell(1, 6, Color::Red).unwrap();
    let mut p = FallingPiece::new((1, 0), T_OFFSETS, Color::Purple);
    // Stem at (1, y + 1) stops on the settled cell at row 6.
    assert_eq!(p.force_down(&g), 4);
    assert_eq!(p.head(), (1, 4));
    assert_eq!(p.force_down(&g), 0);
}

#[test]
fn locking_into_the_last_gap_completes_and_clears_the_row() {
    let mut g = grid(4, 6, 2);
    for x in 0..3 {
        g.set_cell(x, 5, Color::Red).unwrap();
    }
    // Hooked piece: three cells one row up plus a foot in column 3.
    let mut p = FallingPiece::new((3, 2), [(0, 0), (0, -1), (-1, -1), (-2, -1)], Color::Blue);
    assert_eq!(p.force_down(&g), 3);
    p.lock(&mut g).unwrap();
    assert!(p.is_locked());

    assert!(g.is_row_full(5));
    let row_above: Vec<Cell> = g.row(4).unwrap().to_vec();

    g.clear_and_compact(5, 1).unwrap();

    assert_eq!(g.row(5).unwrap(), row_above.as_slice());
    assert!(g.row(0).unwrap().iter().all(|c| *c == Cell::Empty));
    assert!(!g.is_row_full(5));
}

#[test]
fn locking_into_the_margin_means_top_out() {
    let mut g = grid(4, 6, 2);
    for y in 2..6 {
        g.set_cell(1, y, Color::Green).unwrap();
    }
    let mut p = FallingPiece::new((1, 0), T_OFFSETS, Color::Purple);
    assert!(!p.try_move_down(&g));
    assert!(!g.check_lose());

    p.lock(&mut g).unwrap();
    assert_eq!(g.cell(1, 1), Some(Cell::Settled(Color::Purple)));
    assert!(g.check_lose());
}

#[test]
fn locked_piece_refuses_further_motion() {
    let mut g = grid(6, 8, 2);
    let mut p = FallingPiece::new((2, 6), T_OFFSETS, Color::Purple);
    p.lock(&mut g).unwrap();
    let settled = g.settled_count();

    assert!(!p.try_move(Direction::Left, &g));
    assert!(!p.try_move_down(&g));
    assert!(!p.rotate(Rotation::Clockwise, &g));
    p.lock(&mut g).unwrap();
    assert_eq!(g.settled_count(), settled);

    p.reset((2, 0), I_OFFSETS, Color::Red);
    assert!(!p.is_locked());
    assert!(p.try_move_down(&g));
}

#[test]
fn locking_out_of_bounds_fails_without_writing() {
    let mut g = grid(4, 6, 2);
    let mut p = FallingPiece::new((0, 5), I_OFFSETS, Color::Red);
    assert!(matches!(
        p.lock(&mut g),
        Err(GridError::InvalidCoordinate { x: -1, y: 5, .. })
    ));
    assert_eq!(g.settled_count(), 0);
    assert!(!p.is_locked());
}

// -----------------------------------------------------------------------------
// Session
// -----------------------------------------------------------------------------

#[test]
fn session_rejects_boards_a_piece_cannot_spawn_on() {
    let narrow = StackingConfig {
        width: 3,
        height: 10,
        upper_border: 2,
    };
    assert!(matches!(
        StackingGame::with_sequence(narrow, 1, ShapeSequence::Uniform),
        Err(GridError::BoardTooNarrow { width: 3, min: 4 })
    ));

    let shallow = StackingConfig {
        width: 6,
        height: 10,
        upper_border: 1,
    };
    assert!(matches!(
        StackingGame::with_sequence(shallow, 1, ShapeSequence::Uniform),
        Err(GridError::InvalidMargin { min: 2, .. })
    ));
}

#[test]
fn fresh_session_shows_one_falling_piece_in_the_margin() {
    let g = StackingGame::new(42).unwrap();
    let cfg = g.grid().config();
    let views: Vec<_> = g.cells().collect();
    assert_eq!(views.len(), cfg.width * cfg.height);

    let falling: Vec<_> = views
        .iter()
        .filter(|(_, _, v)| matches!(v, CellView::Falling(_)))
        .collect();
    assert_eq!(falling.len(), 4);
    assert!(falling.iter().all(|(_, y, _)| *y < cfg.upper_border));
    assert!(views
        .iter()
        .all(|(_, _, v)| !matches!(v, CellView::Settled(_))));
}

#[test]
fn gravity_tick_moves_the_piece_one_row() {
    let mut g = StackingGame::new(7).unwrap();
    let (x, y) = g.piece().head();
    let r = g.tick().unwrap();
    assert_eq!(r, StepResult::default());
    assert_eq!(g.piece().head(), (x, y + 1));
    assert_eq!(g.ticks, 1);
}

#[test]
fn blocked_commands_are_reported_and_do_nothing() {
    let mut g = StackingGame::new(11).unwrap();
    let mut moved = 0;
    loop {
        let before = g.piece().clone();
        let r = g.apply(StackCommand::Move(Direction::Left)).unwrap();
        if r.rejected {
            assert_eq!(g.piece(), &before);
            break;
        }
        moved += 1;
        assert!(moved <= g.grid().width());
    }
    assert!(g.piece().cells().iter().any(|&(x, _)| x == 0));
}

#[test]
fn hard_drop_locks_and_spawns_the_next_shape() {
    let mut g = StackingGame::with_sequence(StackingConfig::default(), 99, ShapeSequence::Bag7)
        .unwrap();
    let next = g.next();
    let r = g.apply(StackCommand::HardDrop).unwrap();
    assert!(r.locked);
    assert!(!r.terminated);
    assert_eq!(g.pieces_locked, 1);
    assert_eq!(g.active, next);
    assert_eq!(g.grid().settled_count(), 4);
    assert!(!g.piece().is_locked());
}

#[test]
fn soft_drop_on_the_floor_locks() {
    let mut g = StackingGame::new(5).unwrap();
    while !g.apply(StackCommand::SoftDrop).unwrap().locked {}
    assert_eq!(g.pieces_locked, 1);
    assert_eq!(g.grid().settled_count(), 4);
}

#[test]
fn completed_rows_are_cleared_and_counted_on_lock() {
    let cfg = StackingConfig {
        width: 4,
        height: 8,
        upper_border: 2,
    };
    let mut g = StackingGame::with_sequence(cfg, 3, ShapeSequence::Uniform).unwrap();
    fill_row(g.grid_mut(), 7, Color::Orange);

    let r = g.apply(StackCommand::HardDrop).unwrap();
    assert!(r.locked);
    assert!(r.cleared_lines >= 1);
    assert_eq!(g.lines_cleared, u64::from(r.cleared_lines));
    assert_eq!(g.score, 100 * g.lines_cleared);
    assert!((0..cfg.height).all(|y| !g.grid().is_row_full(y)));
    assert_eq!(
        g.grid().settled_count(),
        4 + 4 - 4 * r.cleared_lines as usize
    );
}

#[test]
fn top_out_terminates_and_latches_game_over() {
    let mut g = StackingGame::new(77).unwrap();
    let cfg = g.grid().config();
    for y in cfg.upper_border..cfg.height {
        for x in 0..cfg.width - 1 {
            g.grid_mut().set_cell(x, y, Color::Blue).unwrap();
        }
    }

    let r = g.apply(StackCommand::HardDrop).unwrap();
    assert!(r.terminated);
    assert!(r.locked);
    assert!(g.game_over);
    assert!(g.grid().check_lose());

    let locked = g.pieces_locked;
    for cmd in [
        StackCommand::Move(Direction::Right),
        StackCommand::Rotate(Rotation::Clockwise),
        StackCommand::HardDrop,
    ] {
        let r = g.apply(cmd).unwrap();
        assert!(r.terminated);
        assert!(!r.locked);
    }
    assert!(g.tick().unwrap().terminated);
    assert_eq!(g.pieces_locked, locked);
    assert!(g
        .cells()
        .all(|(_, _, v)| !matches!(v, CellView::Falling(_))));
}

#[test]
fn same_seed_and_commands_give_the_same_session() {
    let script = [
        StackCommand::Rotate(Rotation::Clockwise),
        StackCommand::Move(Direction::Left),
        StackCommand::Move(Direction::Left),
        StackCommand::HardDrop,
        StackCommand::Move(Direction::Right),
        StackCommand::SoftDrop,
        StackCommand::HardDrop,
    ];
    let mut a = StackingGame::new(2024).unwrap();
    let mut b = StackingGame::new(2024).unwrap();
    for _ in 0..6 {
        for cmd in script {
            assert_eq!(a.apply(cmd).unwrap(), b.apply(cmd).unwrap());
            assert_eq!(a.tick().unwrap(), b.tick().unwrap());
        }
    }
    assert_eq!(a.render_ascii(), b.render_ascii());
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn bag7_emits_each_shape_exactly_once_per_bag() {
    let mut spawner = Spawner::new(9001, ShapeSequence::Bag7, 10);
    for _ in 0..4 {
        let mut seen: Vec<Shape> = (0..7).map(|_| spawner.advance()).collect();
        seen.sort_by_key(|s| s.glyph());
        seen.dedup();
        assert_eq!(seen.len(), 7);
    }
}

#[test]
fn spawner_previews_the_shape_it_spawns_next() {
    let mut spawner = Spawner::new(4, ShapeSequence::Uniform, 10);
    assert_eq!(spawner.spawn_head(), (4, 0));

    for _ in 0..20 {
        let shown = spawner.preview();
        let (shape, piece) = spawner.spawn();
        assert_eq!(shape, shown);
        assert_eq!(piece.head(), (4, 0));
        assert_eq!(piece.color(), shape.color());
        assert!(piece.cells().iter().all(|&(_, y)| (0..2).contains(&y)));
    }
}

#[test]
fn respawn_reuses_the_locked_piece() {
    let mut g = grid(6, 8, 2);
    let mut spawner = Spawner::new(12, ShapeSequence::Bag7, g.width());
    let (_, mut piece) = spawner.spawn();
    piece.force_down(&g);
    piece.lock(&mut g).unwrap();
    assert!(piece.is_locked());

    let shown = spawner.preview();
    let shape = spawner.respawn(&mut piece);
    assert_eq!(shape, shown);
    assert_eq!(piece, FallingPiece::new((2, 0), shape.offsets(), shape.color()));
}

#[test]
fn render_shows_only_visible_rows() {
    let g = StackingGame::new(1).unwrap();
    let cfg = g.grid().config();
    let text = g.render_ascii();
    let board_lines = text.lines().filter(|l| l.starts_with('|')).count();
    assert_eq!(board_lines, cfg.visible_rows());
    // The fresh piece sits entirely in the hidden margin.
    assert!(!text.contains('#'));
}

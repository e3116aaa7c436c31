use blockfall::core::{Board, SequenceSpawner, SimConfig, Simulation, Snapshot};
use blockfall::term::{AnchorY, FrameBuffer, GameView, Viewport};
use blockfall::types::{PieceKind, MAX_COLUMNS, MAX_ROWS};

fn snapshot(board: Board, kinds: &[PieceKind]) -> Snapshot {
    let config = SimConfig::with_size(board.columns() as u16, board.rows() as u16);
    let mut sim = Simulation::with_board(config, board, SequenceSpawner::new(kinds.to_vec())).unwrap();
    sim.start();
    sim.snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = snapshot(Board::new(10, 18), &[PieceKind::T]);
    let view = GameView::default();

    // 10 cells * 2 columns + border = 22 wide; 18 rows + border = 20 tall.
    let fb = view.render(&snap, Viewport::new(22, 20));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 19).unwrap().ch, '└');
    assert_eq!(fb.get(21, 19).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_row_zero_at_the_bottom() {
    let mut board = Board::new(10, 4);
    board.lock(0, 0, PieceKind::I);
    let snap = snapshot(board, &[PieceKind::T]);

    let fb = GameView::default().render(&snap, Viewport::new(22, 6));

    // Row 0 sits just above the bottom border, two columns per cell.
    assert_eq!(fb.get(1, 4).unwrap().ch, '█');
    assert_eq!(fb.get(2, 4).unwrap().ch, '█');
    assert_eq!(fb.get(3, 4).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let snap = snapshot(Board::new(10, 4), &[PieceKind::T]);
    let fb = GameView::default().render(&snap, Viewport::new(22, 6));

    // T spawns at (5, 3); its flat row covers x = 4..=6 on the top row and the
    // nub hangs above the board.
    for x in [9, 10, 11, 12, 13, 14] {
        assert_eq!(fb.get(x, 1).unwrap().ch, '█', "active at column {}", x);
    }
    // Ghost rests on the floor with its nub on row 1.
    assert_eq!(fb.get(9, 4).unwrap().ch, '░');
    assert_eq!(fb.get(11, 3).unwrap().ch, '░');
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let snap = snapshot(Board::new(10, 18), &[PieceKind::T]);
    let fb = GameView::default().render(&snap, Viewport::new(60, 20));
    let all = screen_text(&fb);
    assert!(all.contains("ROWS"));
    assert!(all.contains("PIECES"));
    assert!(all.contains("PLAYING"));
}

#[test]
fn term_view_skips_side_panel_when_narrow() {
    let snap = snapshot(Board::new(10, 18), &[PieceKind::T]);
    let fb = GameView::default().render(&snap, Viewport::new(22, 20));
    assert!(!screen_text(&fb).contains("ROWS"));
}

#[test]
fn term_view_overlays_pause_and_game_over() {
    let mut snap = snapshot(Board::new(10, 18), &[PieceKind::T]);
    snap.paused = true;
    let fb = GameView::default().render(&snap, Viewport::new(22, 20));
    assert!(screen_text(&fb).contains("PAUSED"));

    let mut board = Board::new(10, 18);
    board.lock(5, 17, PieceKind::O);
    let over = snapshot(board, &[PieceKind::T]);
    let fb = GameView::default().render(&over, Viewport::new(60, 20));
    let all = screen_text(&fb);
    assert!(all.contains("GAME OVER"));
    assert!(all.contains("BLOCKED"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = snapshot(Board::new(10, 18), &[PieceKind::T]);
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));
    // start_y = (30 - 20) / 2 = 5
    assert_eq!(fb.get(0, 5).unwrap().ch, '┌');

    let top = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = top.render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = snapshot(Board::new(10, 18), &[PieceKind::T]);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(1, 1);
    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    assert_eq!(fb, view.render(&snap, Viewport::new(40, 24)));
}

#[test]
fn term_view_renders_largest_board_in_small_terminal() {
    let config = SimConfig::with_size(MAX_COLUMNS, MAX_ROWS);
    assert!(config.validate().is_ok());
    let mut sim = Simulation::new(config, SequenceSpawner::new(vec![PieceKind::I])).unwrap();
    sim.start();
    let snap = sim.snapshot();

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    assert_eq!((fb.width(), fb.height()), (80, 24));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');

    let fb = GameView::new(300, 300).render(&snap, Viewport::new(80, 24));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_clamps_boards_wider_than_the_screen_range() {
    let snap = Snapshot {
        columns: 33000,
        rows: 4,
        cells: vec![Some(PieceKind::Z); 33000 * 4],
        ..Snapshot::default()
    };
    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    assert_eq!(fb.get(1, 10).unwrap().ch, '█');
}

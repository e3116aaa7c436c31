//! Property tests for collision, rotation, locking and collapse.
//!
//! Boards are generated with random sizes and random fill; shapes are either
//! catalog templates or arbitrary bitmasks.

use proptest::prelude::*;

use blockfall::core::{ActivePiece, Board, LineClearer, Shape};
use blockfall::types::{PieceKind, RotationDirection};

fn board_with_fill(fill_chance: f64) -> impl Strategy<Value = Board> {
    (3u16..12, 3u16..12).prop_flat_map(move |(columns, rows)| {
        prop::collection::vec(
            prop::bool::weighted(fill_chance),
            columns as usize * rows as usize,
        )
        .prop_map(move |fill| {
            let mut board = Board::new(columns, rows);
            for (i, filled) in fill.into_iter().enumerate() {
                if filled {
                    let x = (i % columns as usize) as i32;
                    let y = (i / columns as usize) as i32;
                    board.set(x, y, Some(PieceKind::Z));
                }
            }
            board
        })
    })
}

fn any_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn row(board: &Board, y: i32) -> Vec<bool> {
    (0..board.columns())
        .map(|x| matches!(board.get(x, y), Some(Some(_))))
        .collect()
}

proptest! {
    #[test]
    fn can_occupy_matches_cell_by_cell_rule(
        board in board_with_fill(0.4),
        bits in any::<u32>(),
        anchor in (-3i32..15, -3i32..15),
    ) {
        let shape = Shape::from_bits(bits);
        let every_cell_ok = shape.pivot_offsets().all(|(dx, dy)| {
            let (x, y) = (anchor.0 + dx, anchor.1 + dy);
            (0..board.columns()).contains(&x)
                && y >= 0
                && (y >= board.rows() || !board.is_occupied(x, y))
        });
        prop_assert_eq!(ActivePiece::can_occupy(&board, anchor, &shape), every_cell_ok);
    }

    #[test]
    fn four_quarter_turns_are_identity(bits in any::<u32>()) {
        let shape = Shape::from_bits(bits);
        for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
            let mut turned = shape;
            for _ in 0..4 {
                turned = turned.rotated(direction);
            }
            prop_assert_eq!(turned, shape);
        }
        let there_and_back = shape
            .rotated(RotationDirection::Clockwise)
            .rotated(RotationDirection::CounterClockwise);
        prop_assert_eq!(there_and_back, shape);
        prop_assert_eq!(shape.rotated(RotationDirection::Clockwise).cell_count(), shape.cell_count());
    }

    #[test]
    fn failed_translate_changes_nothing(
        board in board_with_fill(0.4),
        kind in any_kind(),
        anchor in (-2i32..14, -2i32..14),
        delta in (-2i32..=2, -2i32..=2),
    ) {
        let mut piece = ActivePiece::new(kind, anchor);
        let before = piece;
        if !piece.try_translate(&board, delta.0, delta.1) {
            prop_assert_eq!(piece, before);
            prop_assert!(!piece.try_translate(&board, delta.0, delta.1));
            prop_assert_eq!(piece, before);
        } else {
            prop_assert_eq!(piece.anchor, (anchor.0 + delta.0, anchor.1 + delta.1));
        }
    }

    #[test]
    fn locked_piece_blocks_its_own_position(
        board in board_with_fill(0.2),
        kind in any_kind(),
        anchor in (0i32..12, 0i32..14),
    ) {
        let piece = ActivePiece::new(kind, anchor);
        let visible = piece.occupied_cells().any(|(_, y)| y < board.rows());
        if piece.fits(&board) && visible {
            let mut board = board.clone();
            let before = board.occupied_count();
            let outcome = piece.lock(&mut board);
            prop_assert!(!ActivePiece::can_occupy(&board, piece.anchor, &piece.shape));
            let stored = piece.occupied_cells().filter(|&(_, y)| y < board.rows()).count();
            prop_assert_eq!(board.occupied_count(), before + stored);
            prop_assert_eq!(outcome.overflowed, stored < 4);
        }
    }

    #[test]
    fn collapse_shifts_rows_above_by_one(
        board in board_with_fill(0.5),
        pick in any::<u16>(),
    ) {
        let cleared = (pick as i32) % board.rows();
        let mut after = board.clone();
        after.clear_and_collapse(cleared);

        for y in 0..cleared {
            prop_assert_eq!(row(&after, y), row(&board, y));
        }
        for y in cleared..board.rows() - 1 {
            prop_assert_eq!(row(&after, y), row(&board, y + 1));
        }
        prop_assert!(after.is_row_empty(board.rows() - 1));
    }

    #[test]
    fn resolve_removes_exactly_the_full_candidates(board in board_with_fill(0.85)) {
        let candidates: Vec<i32> = (0..board.rows().min(5)).collect();
        let full = candidates.iter().filter(|&&y| board.is_row_full(y)).count();

        let mut after = board.clone();
        let cleared = LineClearer::resolve(&mut after, &candidates);

        prop_assert_eq!(cleared.len(), full);
        prop_assert!(cleared.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(
            after.occupied_count(),
            board.occupied_count() - full * board.columns() as usize
        );
    }
}

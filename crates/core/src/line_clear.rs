//! Line clearing - remove full rows touched by a lock
//!
//! Candidates are examined from the highest row down. Collapsing a row only
//! moves the rows above it, so every candidate still to be examined keeps its
//! index and nothing is skipped or visited twice.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::SHAPE_SIZE;

/// Cleared rows in pre-clear indices, ascending
pub type Cleared = ArrayVec<i32, SHAPE_SIZE>;

#[derive(Debug, Clone, Copy, Default)]
pub struct LineClearer;

impl LineClearer {
    /// Clear every full row among `candidate_rows` and collapse the board.
    ///
    /// Candidates may be unsorted and may repeat; out-of-range rows are ignored.
    /// At most [`SHAPE_SIZE`] distinct candidates are considered, which covers
    /// every row a single piece can touch.
    pub fn resolve(board: &mut Board, candidate_rows: &[i32]) -> Cleared {
        let mut rows: ArrayVec<i32, SHAPE_SIZE> = ArrayVec::new();
        for &row in candidate_rows {
            if (0..board.rows()).contains(&row) && !rows.contains(&row) && !rows.is_full() {
                rows.push(row);
            }
        }
        rows.sort_unstable_by(|a, b| b.cmp(a));

        let mut cleared = Cleared::new();
        for row in rows {
            if board.is_row_full(row) {
                board.clear_and_collapse(row);
                cleared.push(row);
            }
        }

        cleared.reverse();
        if !cleared.is_empty() {
            log::debug!("cleared rows {:?}", cleared.as_slice());
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_ignores_rows_that_are_not_full() {
        let mut board = Board::from_picture(&["#.#", "###"], PieceKind::I);
        let cleared = LineClearer::resolve(&mut board, &[1]);
        assert!(cleared.is_empty());
        assert_eq!(board.occupied_count(), 5);
    }

    #[test]
    fn test_duplicates_and_out_of_range_candidates() {
        let mut board = Board::from_picture(&["...", "###"], PieceKind::I);
        let cleared = LineClearer::resolve(&mut board, &[0, 0, -1, 7]);
        assert_eq!(cleared.as_slice(), &[0]);
        assert_eq!(board.occupied_count(), 0);
    }
}

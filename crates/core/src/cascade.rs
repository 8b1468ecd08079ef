//! Cascade resolution - gravity and refill after chains are removed
//!
//! Both passes report their work grouped per column (columns with nothing to
//! report are left out) so a renderer can stagger falls column by column.

use rand::RngCore;

use crate::board::Board;
use crate::matcher::{detect_matches, Chain};
use crate::piece::PieceId;
use crate::rng::random_kind_where;
use crate::scoring::Scorer;
use crate::types::{CookieKind, Position};

/// A cookie that dropped straight down within its column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    pub piece: PieceId,
    pub column: u8,
    pub from_row: u8,
    pub to_row: u8,
}

impl Fall {
    pub fn distance(&self) -> u8 {
        self.from_row - self.to_row
    }
}

/// A new cookie dropped in from above the grid.
///
/// `from_row` is the virtual entry row just above the top (equal to the
/// number of rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub piece: PieceId,
    pub kind: CookieKind,
    pub column: u8,
    pub from_row: u8,
    pub to_row: u8,
}

/// Detect every chain, score it, and take its cookies off the board.
///
/// Returns the scored chains; an empty result means the arrangement is stable.
pub fn remove_matches(board: &mut Board, scorer: &mut Scorer) -> Vec<Chain> {
    let mut chains = detect_matches(board);
    if chains.is_empty() {
        return chains;
    }
    scorer.score_chains(&mut chains);
    board.remove_pieces(&chains);
    chains
}

/// Pull cookies down into empty playable cells.
///
/// Each column is scanned bottom-up. An empty playable cell takes the nearest
/// cookie above it in the same column, which moves there directly however
/// many rows it has to fall. Non-playable cells hold nothing and do not stop
/// cookies above them.
pub fn fill_holes(board: &mut Board) -> Vec<Vec<Fall>> {
    let (columns, rows) = (board.columns(), board.rows());
    let mut out = Vec::new();

    for column in 0..columns {
        let mut falls = Vec::new();
        for row in 0..rows {
            let hole = Position::new(column, row);
            if !board.grid().is_playable(hole) || board.is_occupied(hole) {
                continue;
            }
            let above = (row + 1..rows)
                .find_map(|lookup| board.get(Position::new(column, lookup)).copied());
            if let Some(piece) = above {
                board.move_piece(piece.id, hole);
                falls.push(Fall {
                    piece: piece.id,
                    column,
                    from_row: piece.row,
                    to_row: row,
                });
            }
        }
        if !falls.is_empty() {
            out.push(falls);
        }
    }
    out
}

/// Create cookies for every empty playable cell, top row first.
///
/// Within one column, each new cookie differs in kind from the one created
/// just above it during this call. `kind_count` must be at least 2.
pub fn top_up<R: RngCore + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    kind_count: u8,
) -> Vec<Vec<Spawn>> {
    let (columns, rows) = (board.columns(), board.rows());
    let mut out = Vec::new();

    for column in 0..columns {
        let mut spawns = Vec::new();
        let mut previous: Option<CookieKind> = None;
        for row in (0..rows).rev() {
            let cell = Position::new(column, row);
            if !board.grid().is_playable(cell) || board.is_occupied(cell) {
                continue;
            }
            let kind = random_kind_where(rng, kind_count, |k| Some(k) == previous);
            previous = Some(kind);
            let piece = board.insert(kind, cell);
            spawns.push(Spawn {
                piece: piece.id,
                kind,
                column,
                from_row: rows,
                to_row: row,
            });
        }
        if !spawns.is_empty() {
            out.push(spawns);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::rng::SimpleRng;
    use crate::types::CookieKind::*;

    #[test]
    fn remove_matches_scores_and_clears() {
        let mut board = Board::from_kinds(Grid::filled(4, 2), |p| match (p.column, p.row) {
            (0..=2, 0) => Some(Danish),
            (3, 0) => Some(Donut),
            (c, _) => Some(if c % 2 == 0 { Cupcake } else { Macaroon }),
        });
        let mut scorer = Scorer::new();

        let chains = remove_matches(&mut board, &mut scorer);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].score(), 60);
        assert_eq!(board.piece_count(), 5);
        for column in 0..3 {
            assert!(board.piece_at(column, 0).is_none());
        }
        assert!(remove_matches(&mut board, &mut scorer).is_empty());
        assert_eq!(scorer.combo_multiplier(), 2);
    }

    #[test]
    fn piece_falls_to_lowest_hole_in_one_move() {
        let mut board = Board::new(Grid::filled(1, 4));
        let id = board.place_piece(Donut, Position::new(0, 3)).unwrap();

        let falls = fill_holes(&mut board);
        assert_eq!(falls.len(), 1);
        assert_eq!(
            falls[0],
            vec![Fall {
                piece: id,
                column: 0,
                from_row: 3,
                to_row: 0
            }]
        );
        assert_eq!(falls[0][0].distance(), 3);
        assert_eq!(board.piece_at(0, 0).map(|p| p.id), Some(id));
        assert!(board.check_invariants());
    }

    #[test]
    fn stack_compacts_in_order() {
        let mut board = Board::new(Grid::filled(1, 5));
        let low = board.place_piece(Danish, Position::new(0, 2)).unwrap();
        let high = board.place_piece(Cupcake, Position::new(0, 4)).unwrap();

        let falls = fill_holes(&mut board);
        let moved: Vec<(PieceId, u8, u8)> =
            falls[0].iter().map(|f| (f.piece, f.from_row, f.to_row)).collect();
        assert_eq!(moved, vec![(low, 2, 0), (high, 4, 1)]);
    }

    #[test]
    fn gravity_crosses_non_playable_cells() {
        // Column with a hole at row 1
        let grid = Grid::from_fn(1, 4, |p| p.row != 1);
        let mut board = Board::new(grid);
        let id = board.place_piece(Macaroon, Position::new(0, 3)).unwrap();

        fill_holes(&mut board);
        assert_eq!(board.piece(id).map(|p| p.row), Some(0));
        assert!(board.get(Position::new(0, 1)).is_none());
    }

    #[test]
    fn untouched_columns_are_omitted() {
        let mut board = Board::from_kinds(Grid::filled(3, 2), |p| {
            (p.column != 1 || p.row == 1).then_some(Croissant)
        });
        let falls = fill_holes(&mut board);
        assert_eq!(falls.len(), 1);
        assert_eq!(falls[0][0].column, 1);
    }

    #[test]
    fn top_up_fills_every_playable_cell() {
        let grid = Grid::from_fn(3, 4, |p| !(p.column == 1 && p.row == 2));
        let mut board = Board::new(grid);
        let mut rng = SimpleRng::new(7);

        let spawns = top_up(&mut board, &mut rng, 6);
        let created: usize = spawns.iter().map(Vec::len).sum();
        assert_eq!(created, 11);
        assert_eq!(board.empty_playable_count(), 0);
        assert!(board.get(Position::new(1, 2)).is_none());
        assert!(board.check_invariants());
    }

    #[test]
    fn top_up_avoids_consecutive_repeats_within_column() {
        let mut rng = SimpleRng::new(42);
        for _ in 0..50 {
            let mut board = Board::new(Grid::filled(2, 9));
            let spawns = top_up(&mut board, &mut rng, 3);
            for column in &spawns {
                // Top row first
                assert_eq!(column[0].to_row, 8);
                for pair in column.windows(2) {
                    assert_ne!(pair[0].kind, pair[1].kind);
                    assert_eq!(pair[0].to_row, pair[1].to_row + 1);
                }
                assert!(column.iter().all(|s| s.from_row == 9));
            }
        }
    }

    #[test]
    fn top_up_leaves_occupied_cells_alone() {
        let mut board = Board::new(Grid::filled(1, 3));
        let keep = board.place_piece(Donut, Position::new(0, 0)).unwrap();
        let mut rng = SimpleRng::new(1);

        let spawns = top_up(&mut board, &mut rng, 6);
        assert_eq!(spawns[0].len(), 2);
        assert_eq!(board.piece_at(0, 0).map(|p| p.id), Some(keep));
    }
}

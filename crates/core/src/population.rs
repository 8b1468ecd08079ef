//! Initial population and shuffling
//!
//! Fills every playable cell so that no three-in-a-row exists on either axis,
//! then retries the whole board until at least one legal swap exists. Some
//! tile shapes can never offer a swap, so retries are capped and exhaustion is
//! reported instead of looping.

use rand::RngCore;

use crate::board::Board;
use crate::error::ShuffleError;
use crate::piece::Piece;
use crate::rng::random_kind_where;
use crate::swaps::{detect_possible_swaps, PossibleSwaps};
use crate::types::{CookieKind, Position};

/// Clear the board and place one cookie per playable cell, in raster order.
///
/// A candidate kind is redrawn while the two cells to its left, or the two
/// cells below it, both hold that kind. Needs `kind_count >= 3`.
pub fn populate<R: RngCore + ?Sized>(board: &mut Board, rng: &mut R, kind_count: u8) -> Vec<Piece> {
    board.clear();
    let cells: Vec<Position> = board.grid().playable_positions().collect();
    let mut created = Vec::with_capacity(cells.len());

    for cell in cells {
        let kind = {
            let b = &*board;
            let pair_matches =
                |first: Option<Position>, second: Option<Position>, kind: CookieKind| {
                    let same = |p: Option<Position>| p.and_then(|p| b.kind_at(p)) == Some(kind);
                    same(first) && same(second)
                };
            random_kind_where(rng, kind_count, |k| {
                pair_matches(cell.offset(-1, 0), cell.offset(-2, 0), k)
                    || pair_matches(cell.offset(0, -1), cell.offset(0, -2), k)
            })
        };
        created.push(board.insert(kind, cell));
    }
    created
}

/// Populate until the board offers a legal swap, up to `max_attempts` times.
///
/// On success returns the created cookies (raster order) and the legal set
/// for the new arrangement.
pub fn shuffle<R: RngCore + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    kind_count: u8,
    max_attempts: u32,
) -> Result<(Vec<Piece>, PossibleSwaps), ShuffleError> {
    for attempt in 1..=max_attempts {
        let created = populate(board, rng, kind_count);
        let swaps = detect_possible_swaps(board);
        if !swaps.is_empty() {
            log::debug!(
                "shuffle produced {} cookies with {} legal swaps (attempt {})",
                created.len(),
                swaps.len(),
                attempt
            );
            return Ok((created, swaps));
        }
        log::debug!("shuffle attempt {} has no legal swap, retrying", attempt);
    }

    log::warn!("shuffle exhausted after {} attempts", max_attempts);
    board.clear();
    Err(ShuffleError::Exhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::matcher::detect_matches;
    use crate::rng::SimpleRng;

    #[test]
    fn populated_board_has_no_chains() {
        for seed in 1..100 {
            let mut board = Board::new(Grid::filled(9, 9));
            let mut rng = SimpleRng::new(seed);
            let created = populate(&mut board, &mut rng, 3);
            assert_eq!(created.len(), 81);
            assert!(detect_matches(&board).is_empty(), "seed {seed}");
            assert!(board.check_invariants());
        }
    }

    #[test]
    fn populate_replaces_previous_cookies() {
        let mut board = Board::new(Grid::filled(4, 4));
        let mut rng = SimpleRng::new(3);
        let first = populate(&mut board, &mut rng, 6);
        let second = populate(&mut board, &mut rng, 6);
        assert_eq!(board.piece_count(), 16);
        assert!(board.piece(first[0].id).is_none());
        assert!(board.piece(second[0].id).is_some());
    }

    #[test]
    fn shuffle_yields_legal_swap() {
        let mut board = Board::new(Grid::filled(9, 9));
        let mut rng = SimpleRng::new(12345);
        let (created, swaps) = shuffle(&mut board, &mut rng, 6, 100).unwrap();
        assert_eq!(created.len(), 81);
        assert!(!swaps.is_empty());
        assert_eq!(swaps, detect_possible_swaps(&board));
    }

    #[test]
    fn shuffle_on_shapeless_grid_exhausts() {
        // Isolated cells: no two playable cells are adjacent
        let grid = Grid::from_fn(5, 5, |p| p.column % 2 == 0 && p.row % 2 == 0);
        let mut board = Board::new(grid);
        let mut rng = SimpleRng::new(1);

        let err = shuffle(&mut board, &mut rng, 6, 7).unwrap_err();
        assert_eq!(err, ShuffleError::Exhausted { attempts: 7 });
        assert_eq!(board.piece_count(), 0);
    }
}

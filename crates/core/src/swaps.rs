//! Swap analysis - which adjacent exchanges create a chain
//!
//! For every pair of horizontally or vertically adjacent cookies, swap them
//! on a scratch [`Arrangement`](crate::board::Arrangement), point-query both
//! cells, and swap back. The legal set is a pure function of the current
//! arrangement and must be recomputed whenever it changes.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::matcher::has_chain_at;
use crate::types::Position;

/// Unordered pair of adjacent cells.
///
/// Stored with the lower position first, so `Swap::new(a, b) == Swap::new(b, a)`
/// and sets of swaps iterate in a canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Swap {
    first: Position,
    second: Position,
}

impl Swap {
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> Position {
        self.first
    }

    pub fn second(&self) -> Position {
        self.second
    }

    pub fn involves(&self, position: Position) -> bool {
        self.first == position || self.second == position
    }
}

/// Legal swaps for one arrangement, in canonical order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PossibleSwaps {
    swaps: BTreeSet<Swap>,
}

impl PossibleSwaps {
    pub fn is_legal(&self, swap: &Swap) -> bool {
        self.swaps.contains(swap)
    }

    pub fn len(&self) -> usize {
        self.swaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Swap> {
        self.swaps.iter()
    }

    /// First legal swap in canonical order, for hint display
    pub fn hint(&self) -> Option<Swap> {
        self.swaps.first().copied()
    }
}

impl<'a> IntoIterator for &'a PossibleSwaps {
    type Item = &'a Swap;
    type IntoIter = std::collections::btree_set::Iter<'a, Swap>;

    fn into_iter(self) -> Self::IntoIter {
        self.swaps.iter()
    }
}

/// Enumerate every adjacent swap that would create a chain touching either
/// moved cookie.
pub fn detect_possible_swaps(board: &Board) -> PossibleSwaps {
    let mut scratch = board.arrangement();
    let mut swaps = BTreeSet::new();

    for position in board.grid().positions() {
        if scratch.get(position).is_none() {
            continue;
        }
        // Right and up neighbours cover every adjacent pair exactly once
        let candidates = [position.offset(1, 0), position.offset(0, 1)];
        for other in candidates.into_iter().flatten() {
            if scratch.get(other).is_none() {
                continue;
            }
            scratch.swap(position, other);
            if has_chain_at(&scratch, other) || has_chain_at(&scratch, position) {
                swaps.insert(Swap::new(position, other));
            }
            scratch.swap(position, other);
        }
    }

    log::trace!("{} legal swaps", swaps.len());
    PossibleSwaps { swaps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::matcher::detect_matches;
    use crate::types::CookieKind::{self, *};

    fn row_board(kinds: &[CookieKind]) -> Board {
        let grid = Grid::filled(kinds.len() as u8, 1);
        Board::from_kinds(grid, |p| Some(kinds[p.column as usize]))
    }

    #[test]
    fn swap_equality_is_symmetric() {
        let a = Position::new(1, 2);
        let b = Position::new(1, 3);
        assert_eq!(Swap::new(a, b), Swap::new(b, a));
        assert_eq!(Swap::new(b, a).first(), a);
        assert!(Swap::new(a, b).involves(b));
    }

    #[test]
    fn finds_the_single_completing_swap() {
        // C C U C : swapping (2,0)<->(3,0) makes C C C U
        let board = row_board(&[Croissant, Croissant, Cupcake, Croissant]);
        let swaps = detect_possible_swaps(&board);
        assert_eq!(swaps.len(), 1);
        assert!(swaps.is_legal(&Swap::new(Position::new(3, 0), Position::new(2, 0))));
        assert_eq!(swaps.hint(), Some(Swap::new(Position::new(2, 0), Position::new(3, 0))));
    }

    #[test]
    fn analysis_does_not_mutate_board() {
        let board = row_board(&[Croissant, Croissant, Cupcake, Croissant]);
        let before = board.clone();
        let _ = detect_possible_swaps(&board);
        assert_eq!(board, before);
    }

    #[test]
    fn no_swaps_on_alternating_row() {
        let board = row_board(&[Donut, Danish, Donut, Danish, Donut]);
        assert!(detect_possible_swaps(&board).is_empty());
    }

    #[test]
    fn legality_matches_hypothetical_swap() {
        let grid = Grid::filled(4, 4);
        let pattern = [
            [Donut, Danish, Donut, Cupcake],
            [Danish, Donut, Cupcake, Danish],
            [Donut, Cupcake, Danish, Donut],
            [Cupcake, Donut, Donut, Danish],
        ];
        let board = Board::from_kinds(grid, |p| Some(pattern[p.row as usize][p.column as usize]));
        let swaps = detect_possible_swaps(&board);

        for position in board.grid().positions() {
            for other in [position.offset(1, 0), position.offset(0, 1)].into_iter().flatten() {
                if !board.grid().contains(other) {
                    continue;
                }
                let swap = Swap::new(position, other);
                let mut trial = board.clone();
                trial.apply_swap(&swap);
                let creates = has_chain_at(&trial, position) || has_chain_at(&trial, other);
                assert_eq!(swaps.is_legal(&swap), creates, "{swap:?}");
                if creates {
                    assert!(!detect_matches(&trial).is_empty());
                }
            }
        }
    }

    #[test]
    fn holes_are_never_swapped() {
        let grid = Grid::from_fn(4, 1, |p| p.column != 2);
        let board =
            Board::from_kinds(grid, |p| Some(if p.column == 3 { Cupcake } else { Croissant }));
        let swaps = detect_possible_swaps(&board);
        assert!(swaps.iter().all(|s| !s.involves(Position::new(2, 0))));
    }
}

//! Board module - owns the grid, the cookies, and the cell slots
//!
//! Cookies live in a slot table keyed by [`PieceId`]; each grid cell holds at
//! most one id. Lookups by `(column, row)` resolve through the cell slots, so
//! a cookie keeps its identity when a swap or a fall moves it.
//!
//! Invariant: a cookie's stored `(column, row)` is always the cell whose slot
//! holds its id, and non-playable cells never hold an id.

use std::collections::{BTreeMap, BTreeSet};

use arrayvec::ArrayVec;

use crate::error::BoardError;
use crate::grid::Grid;
use crate::matcher::{Chain, KindLookup};
use crate::piece::{Piece, PieceId};
use crate::swaps::Swap;
use crate::types::{Cell, CookieKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    grid: Grid,
    pieces: BTreeMap<PieceId, Piece>,
    /// Flat array of cell slots, same layout as the grid mask
    slots: Vec<Option<PieceId>>,
    next_id: u32,
}

impl Board {
    /// Create an empty board over `grid`
    pub fn new(grid: Grid) -> Self {
        let cells = usize::from(grid.columns()) * usize::from(grid.rows());
        Self {
            grid,
            pieces: BTreeMap::new(),
            slots: vec![None; cells],
            next_id: 0,
        }
    }

    /// Create a board and place `kind(position)` on every playable cell that
    /// returns `Some`. Non-playable cells are skipped. Mostly useful for
    /// building synthetic arrangements.
    pub fn from_kinds(grid: Grid, mut kind: impl FnMut(Position) -> Cell) -> Self {
        let mut board = Self::new(grid);
        let cells: Vec<Position> = board.grid.playable_positions().collect();
        for position in cells {
            if let Some(k) = kind(position) {
                board.insert(k, position);
            }
        }
        board
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn columns(&self) -> u8 {
        self.grid.columns()
    }

    pub fn rows(&self) -> u8 {
        self.grid.rows()
    }

    /// Whether the cell is playable.
    ///
    /// # Panics
    ///
    /// Panics if `(column, row)` is outside the grid.
    pub fn tile_at(&self, column: u8, row: u8) -> bool {
        self.grid.tile_at(column, row)
    }

    /// The cookie at `(column, row)`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `(column, row)` is outside the grid.
    pub fn piece_at(&self, column: u8, row: u8) -> Option<&Piece> {
        let position = Position::new(column, row);
        assert!(
            self.grid.contains(position),
            "piece_at({column}, {row}) outside {}x{} grid",
            self.columns(),
            self.rows()
        );
        self.get(position)
    }

    /// Non-panicking lookup: `None` for empty or out-of-bounds cells
    pub fn get(&self, position: Position) -> Option<&Piece> {
        if !self.grid.contains(position) {
            return None;
        }
        self.slots[self.grid.index(position)].and_then(|id| self.pieces.get(&id))
    }

    pub fn kind_at(&self, position: Position) -> Cell {
        self.get(position).map(|p| p.kind)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.grid.contains(position) && self.slots[self.grid.index(position)].is_some()
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// All cookies, in id (creation) order
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Playable cells currently holding no cookie
    pub fn empty_playable_count(&self) -> usize {
        self.grid
            .playable_positions()
            .filter(|&p| self.slots[self.grid.index(p)].is_none())
            .count()
    }

    /// In-bounds orthogonal neighbours: left, right, down, up
    pub fn neighbours(&self, position: Position) -> ArrayVec<Position, 4> {
        let mut out = ArrayVec::new();
        for (dc, dr) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            if let Some(n) = position.offset(dc, dr) {
                if self.grid.contains(n) {
                    out.push(n);
                }
            }
        }
        out
    }

    /// Put a new cookie on an empty playable cell
    pub fn place_piece(
        &mut self,
        kind: CookieKind,
        position: Position,
    ) -> Result<PieceId, BoardError> {
        if !self.grid.contains(position) {
            return Err(BoardError::OutOfBounds(position));
        }
        if !self.grid.is_playable(position) {
            return Err(BoardError::NotPlayable(position));
        }
        if self.is_occupied(position) {
            return Err(BoardError::Occupied(position));
        }
        Ok(self.insert(kind, position).id)
    }

    /// Placement for callers that already know the cell is empty and playable
    pub(crate) fn insert(&mut self, kind: CookieKind, position: Position) -> Piece {
        debug_assert!(self.grid.is_playable(position));
        debug_assert!(!self.is_occupied(position));

        let id = PieceId(self.next_id);
        self.next_id += 1;
        let piece = Piece {
            id,
            kind,
            column: position.column,
            row: position.row,
        };
        let idx = self.grid.index(position);
        self.slots[idx] = Some(id);
        self.pieces.insert(id, piece);
        piece
    }

    /// Exchange the two cookies of `swap`, both their stored positions and
    /// their cell slots. Returns the ids that moved (lower position first), or
    /// `None` if either cell is empty.
    ///
    /// The swap must join two adjacent cells; anything else is a caller bug.
    pub fn apply_swap(&mut self, swap: &Swap) -> Option<(PieceId, PieceId)> {
        let (a, b) = (swap.first(), swap.second());
        debug_assert!(a.is_adjacent(b), "apply_swap on non-adjacent cells {a:?} {b:?}");
        if !self.grid.contains(a) || !self.grid.contains(b) {
            return None;
        }

        let (ia, ib) = (self.grid.index(a), self.grid.index(b));
        let (id_a, id_b) = match (self.slots[ia], self.slots[ib]) {
            (Some(x), Some(y)) => (x, y),
            _ => return None,
        };

        self.slots.swap(ia, ib);
        if let Some(p) = self.pieces.get_mut(&id_a) {
            p.column = b.column;
            p.row = b.row;
        }
        if let Some(p) = self.pieces.get_mut(&id_b) {
            p.column = a.column;
            p.row = a.row;
        }
        Some((id_a, id_b))
    }

    /// Clear every cookie belonging to any chain. Cookies shared between
    /// chains are removed once. Returns how many cookies left the board.
    pub fn remove_pieces(&mut self, chains: &[Chain]) -> usize {
        let ids: BTreeSet<PieceId> = chains
            .iter()
            .flat_map(|c| c.pieces().iter().map(|p| p.id))
            .collect();

        let mut removed = 0;
        for id in ids {
            if let Some(piece) = self.pieces.remove(&id) {
                let idx = self.grid.index(piece.position());
                if self.slots[idx] == Some(id) {
                    self.slots[idx] = None;
                }
                removed += 1;
            }
        }
        removed
    }

    /// Move a cookie to an empty playable cell (gravity)
    pub(crate) fn move_piece(&mut self, id: PieceId, to: Position) {
        let Some(piece) = self.pieces.get_mut(&id) else {
            return;
        };
        debug_assert!(self.grid.is_playable(to));
        debug_assert!(self.slots[self.grid.index(to)].is_none());

        let from = self.grid.index(piece.position());
        self.slots[from] = None;
        piece.column = to.column;
        piece.row = to.row;
        let idx = self.grid.index(to);
        self.slots[idx] = Some(id);
    }

    /// Drop every cookie. Ids keep counting up from where they were.
    pub fn clear(&mut self) {
        self.pieces.clear();
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Copy of the kinds on every cell, for hypothetical edits
    pub fn arrangement(&self) -> Arrangement {
        Arrangement {
            columns: self.columns(),
            rows: self.rows(),
            cells: self
                .slots
                .iter()
                .map(|slot| slot.and_then(|id| self.pieces.get(&id)).map(|p| p.kind))
                .collect(),
        }
    }

    /// Verify the slot/position invariant in both directions
    pub fn check_invariants(&self) -> bool {
        let pieces_match_slots = self.pieces.values().all(|p| {
            let position = p.position();
            self.grid.is_playable(position) && self.slots[self.grid.index(position)] == Some(p.id)
        });
        let slots_match_pieces = self
            .slots
            .iter()
            .flatten()
            .all(|id| self.pieces.contains_key(id));
        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        pieces_match_slots && slots_match_pieces && occupied == self.pieces.len()
    }
}

impl KindLookup for Board {
    fn columns(&self) -> u8 {
        self.grid.columns()
    }

    fn rows(&self) -> u8 {
        self.grid.rows()
    }

    fn kind_at(&self, position: Position) -> Cell {
        Board::kind_at(self, position)
    }
}

/// Flat copy of the kinds on a board, detached from piece identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    columns: u8,
    rows: u8,
    cells: Vec<Cell>,
}

impl Arrangement {
    fn index(&self, position: Position) -> Option<usize> {
        if position.column >= self.columns || position.row >= self.rows {
            return None;
        }
        Some(usize::from(position.row) * usize::from(self.columns) + usize::from(position.column))
    }

    pub fn get(&self, position: Position) -> Cell {
        self.index(position).and_then(|idx| self.cells[idx])
    }

    /// Exchange two cells; out-of-bounds positions are ignored
    pub fn swap(&mut self, a: Position, b: Position) {
        if let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) {
            self.cells.swap(ia, ib);
        }
    }
}

impl KindLookup for Arrangement {
    fn columns(&self) -> u8 {
        self.columns
    }

    fn rows(&self) -> u8 {
        self.rows
    }

    fn kind_at(&self, position: Position) -> Cell {
        self.get(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CookieKind::*;

    #[test]
    fn test_board_new_empty() {
        let board = Board::new(Grid::filled(9, 9));
        assert_eq!(board.piece_count(), 0);
        assert_eq!(board.empty_playable_count(), 81);
        assert!(board.check_invariants());
    }

    #[test]
    fn test_place_and_lookup() {
        let mut board = Board::new(Grid::filled(4, 4));
        let id = board.place_piece(Donut, Position::new(2, 3)).unwrap();

        let piece = board.piece_at(2, 3).unwrap();
        assert_eq!(piece.id, id);
        assert_eq!(piece.kind, Donut);
        assert_eq!(board.piece(id).map(|p| p.position()), Some(Position::new(2, 3)));
        assert_eq!(board.kind_at(Position::new(2, 3)), Some(Donut));
        assert_eq!(board.kind_at(Position::new(3, 3)), None);
    }

    #[test]
    fn test_place_rejections() {
        let grid = Grid::from_fn(3, 3, |p| p != Position::new(1, 1));
        let mut board = Board::new(grid);

        assert_eq!(
            board.place_piece(Danish, Position::new(3, 0)),
            Err(BoardError::OutOfBounds(Position::new(3, 0)))
        );
        assert_eq!(
            board.place_piece(Danish, Position::new(1, 1)),
            Err(BoardError::NotPlayable(Position::new(1, 1)))
        );
        board.place_piece(Danish, Position::new(0, 0)).unwrap();
        assert_eq!(
            board.place_piece(Cupcake, Position::new(0, 0)),
            Err(BoardError::Occupied(Position::new(0, 0)))
        );
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_piece_at_out_of_bounds_panics() {
        let board = Board::new(Grid::filled(9, 9));
        let _ = board.piece_at(0, 9);
    }

    #[test]
    fn test_apply_swap_keeps_identity() {
        let mut board = Board::new(Grid::filled(3, 3));
        let a = board.place_piece(Croissant, Position::new(0, 0)).unwrap();
        let b = board.place_piece(Macaroon, Position::new(1, 0)).unwrap();

        let swap = Swap::new(Position::new(1, 0), Position::new(0, 0));
        assert_eq!(board.apply_swap(&swap), Some((a, b)));

        assert_eq!(board.piece_at(1, 0).map(|p| p.id), Some(a));
        assert_eq!(board.piece_at(0, 0).map(|p| p.id), Some(b));
        assert_eq!(board.piece(a).map(|p| p.position()), Some(Position::new(1, 0)));
        assert!(board.check_invariants());
    }

    #[test]
    fn test_apply_swap_with_empty_cell_is_noop() {
        let mut board = Board::new(Grid::filled(3, 3));
        board.place_piece(Croissant, Position::new(0, 0)).unwrap();
        let before = board.clone();

        let swap = Swap::new(Position::new(0, 0), Position::new(0, 1));
        assert_eq!(board.apply_swap(&swap), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_remove_shared_piece_once() {
        let mut board = Board::new(Grid::filled(3, 3));
        let ids: Vec<PieceId> = [(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)]
            .iter()
            .map(|&(c, r)| board.place_piece(Donut, Position::new(c, r)).unwrap())
            .collect();

        let chains = crate::matcher::detect_matches(&board);
        assert_eq!(chains.len(), 2);
        // (0,0) sits in both chains
        assert_eq!(board.remove_pieces(&chains), ids.len());
        assert_eq!(board.piece_count(), 0);
        assert!(board.check_invariants());
    }

    #[test]
    fn test_neighbours_at_corner() {
        let board = Board::new(Grid::filled(3, 3));
        let n = board.neighbours(Position::new(0, 0));
        assert_eq!(n.as_slice(), &[Position::new(1, 0), Position::new(0, 1)]);
        assert_eq!(board.neighbours(Position::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_from_kinds_skips_holes() {
        let grid = Grid::from_fn(3, 1, |p| p.column != 1);
        let board = Board::from_kinds(grid, |_| Some(Cupcake));
        assert_eq!(board.piece_count(), 2);
        assert!(board.get(Position::new(1, 0)).is_none());
        assert!(board.check_invariants());
    }

    #[test]
    fn test_clear_keeps_ids_fresh() {
        let mut board = Board::new(Grid::filled(2, 2));
        let first = board.place_piece(Danish, Position::new(0, 0)).unwrap();
        board.clear();
        let second = board.place_piece(Danish, Position::new(0, 0)).unwrap();
        assert!(second > first);
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_arrangement_swap_is_detached() {
        let board = Board::from_kinds(Grid::filled(2, 1), |p| {
            Some(if p.column == 0 { Donut } else { Danish })
        });
        let mut arr = board.arrangement();
        arr.swap(Position::new(0, 0), Position::new(1, 0));
        assert_eq!(arr.get(Position::new(0, 0)), Some(Danish));
        assert_eq!(board.kind_at(Position::new(0, 0)), Some(Donut));
    }
}

//! Grid module - the level's tile shape
//!
//! A rectangular `columns x rows` index space with a per-cell playable mask.
//! Row 0 is the bottom row. The mask is fixed once the grid is handed to a
//! [`Board`](crate::board::Board).

use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: u8,
    rows: u8,
    /// Flat playable mask, row-major from the bottom row (row * columns + column)
    tiles: Vec<bool>,
}

impl Grid {
    /// Grid with no playable cells
    pub fn new(columns: u8, rows: u8) -> Self {
        Self {
            columns,
            rows,
            tiles: vec![false; usize::from(columns) * usize::from(rows)],
        }
    }

    /// Grid where every cell is playable
    pub fn filled(columns: u8, rows: u8) -> Self {
        Self {
            columns,
            rows,
            tiles: vec![true; usize::from(columns) * usize::from(rows)],
        }
    }

    /// Build a mask by asking `playable` about every cell
    pub fn from_fn(columns: u8, rows: u8, mut playable: impl FnMut(Position) -> bool) -> Self {
        let mut grid = Self::new(columns, rows);
        for position in grid.positions() {
            let idx = grid.index(position);
            grid.tiles[idx] = playable(position);
        }
        grid
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Calculate flat index from a position known to be in bounds
    #[inline(always)]
    pub(crate) fn index(&self, position: Position) -> usize {
        usize::from(position.row) * usize::from(self.columns) + usize::from(position.column)
    }

    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        position.column < self.columns && position.row < self.rows
    }

    /// Playable check that treats out-of-bounds cells as non-playable
    #[inline]
    pub fn is_playable(&self, position: Position) -> bool {
        self.contains(position) && self.tiles[self.index(position)]
    }

    /// Playable check for a cell that must lie inside the grid.
    ///
    /// # Panics
    ///
    /// Panics if `(column, row)` is outside the grid.
    pub fn tile_at(&self, column: u8, row: u8) -> bool {
        let position = Position::new(column, row);
        assert!(
            self.contains(position),
            "tile_at({column}, {row}) outside {}x{} grid",
            self.columns,
            self.rows
        );
        self.tiles[self.index(position)]
    }

    /// Mark a cell playable or not. Out-of-bounds cells are ignored.
    pub fn set_playable(&mut self, position: Position, playable: bool) {
        if self.contains(position) {
            let idx = self.index(position);
            self.tiles[idx] = playable;
        }
    }

    /// Every cell in raster order: rows bottom-up, columns left to right
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| Position::new(column, row)))
    }

    /// Playable cells in raster order
    pub fn playable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |&p| self.tiles[self.index(p)])
    }

    pub fn playable_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t).count()
    }
}

//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, level loading, observation protocol).
//!
//! # Board Dimensions
//!
//! The classic level layout is a 9x9 grid:
//!
//! - **Columns**: 9 (indexed 0-8, left to right)
//! - **Rows**: 9 (indexed 0-8, **bottom to top**)
//!
//! Level files list rows top-down; the loader flips them once at load time so
//! that row 0 is always the bottom row inside the core.
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_CHAIN_LENGTH` | 3 | Shortest run that counts as a chain |
//! | `BASE_CHAIN_SCORE` | 60 | Points per cookie beyond the second |
//! | `COOKIE_KIND_COUNT` | 6 | Number of distinct cookie kinds |
//! | `MIN_KIND_COUNT` | 3 | Fewest kinds a level may be played with |
//! | `DEFAULT_MAX_SHUFFLE_ATTEMPTS` | 100 | Population retries before giving up |
//! | `DEFAULT_MAX_CASCADE_STEPS` | 64 | Cascade passes resolved per turn |
//!
//! # Examples
//!
//! ```
//! use cookie_crunch_types::{ChainAxis, CookieKind, Position, NUM_COLUMNS, NUM_ROWS};
//!
//! // Parse from string (case-insensitive)
//! let kind = CookieKind::from_str("donut").unwrap();
//! assert_eq!(kind, CookieKind::Donut);
//! assert_eq!(kind.as_str(), "donut");
//!
//! // Adjacency is orthogonal only
//! let a = Position::new(3, 4);
//! assert!(a.is_adjacent(Position::new(3, 5)));
//! assert!(!a.is_adjacent(Position::new(4, 5)));
//!
//! assert_eq!(ChainAxis::Horizontal.as_str(), "horizontal");
//! assert_eq!((NUM_COLUMNS, NUM_ROWS), (9, 9));
//! ```

/// Default number of columns in a level
pub const NUM_COLUMNS: u8 = 9;

/// Default number of rows in a level
pub const NUM_ROWS: u8 = 9;

/// Shortest run of identical cookies that forms a chain
pub const MIN_CHAIN_LENGTH: usize = 3;

/// Base score unit: a 3-chain is worth 60, a 4-chain 120, a 5-chain 180, ...
pub const BASE_CHAIN_SCORE: u32 = 60;

/// Number of distinct cookie kinds
pub const COOKIE_KIND_COUNT: u8 = 6;

/// Fewest kinds a level can use.
///
/// Population rejects at most two candidate kinds per cell, so three kinds
/// always leave one acceptable draw.
pub const MIN_KIND_COUNT: u8 = 3;

/// Default cap on full re-populations while looking for a board with a legal swap
pub const DEFAULT_MAX_SHUFFLE_ATTEMPTS: u32 = 100;

/// Default cap on detect/remove/refill passes within one turn
pub const DEFAULT_MAX_CASCADE_STEPS: u32 = 64;

/// The six cookie kinds
///
/// Index order matches the sprite sheet:
/// - **Croissant**
/// - **Cupcake**
/// - **Danish**
/// - **Donut**
/// - **Macaroon**
/// - **SugarCookie**
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CookieKind {
    Croissant,
    Cupcake,
    Danish,
    Donut,
    Macaroon,
    SugarCookie,
}

impl CookieKind {
    /// All kinds in index order
    pub const ALL: [CookieKind; 6] = [
        CookieKind::Croissant,
        CookieKind::Cupcake,
        CookieKind::Danish,
        CookieKind::Donut,
        CookieKind::Macaroon,
        CookieKind::SugarCookie,
    ];

    /// Kind at `index`, or `None` past the end of [`CookieKind::ALL`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this kind within [`CookieKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse cookie kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use cookie_crunch_types::CookieKind;
    ///
    /// assert_eq!(CookieKind::from_str("Croissant"), Some(CookieKind::Croissant));
    /// assert_eq!(CookieKind::from_str("sugarcookie"), Some(CookieKind::SugarCookie));
    /// assert_eq!(CookieKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "croissant" => Some(CookieKind::Croissant),
            "cupcake" => Some(CookieKind::Cupcake),
            "danish" => Some(CookieKind::Danish),
            "donut" => Some(CookieKind::Donut),
            "macaroon" => Some(CookieKind::Macaroon),
            "sugarcookie" => Some(CookieKind::SugarCookie),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CookieKind::Croissant => "croissant",
            CookieKind::Cupcake => "cupcake",
            CookieKind::Danish => "danish",
            CookieKind::Donut => "donut",
            CookieKind::Macaroon => "macaroon",
            CookieKind::SugarCookie => "sugarcookie",
        }
    }
}

/// Axis along which a chain runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChainAxis {
    Horizontal,
    Vertical,
}

impl ChainAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainAxis::Horizontal => "horizontal",
            ChainAxis::Vertical => "vertical",
        }
    }
}

/// A cell address on the grid.
///
/// Rows count upward from the bottom of the board. Ordering is lexicographic
/// by column, then row, which is the canonical order used for swap sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub column: u8,
    pub row: u8,
}

impl Position {
    pub const fn new(column: u8, row: u8) -> Self {
        Self { column, row }
    }

    /// True if `other` shares an edge with this cell (never diagonal)
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dc = self.column.abs_diff(other.column);
        let dr = self.row.abs_diff(other.row);
        u16::from(dc) + u16::from(dr) == 1
    }

    /// Step by `(dc, dr)`; `None` if the result leaves the `u8` range.
    pub fn offset(&self, dc: i8, dr: i8) -> Option<Position> {
        let column = u8::try_from(i16::from(self.column) + i16::from(dc)).ok()?;
        let row = u8::try_from(i16::from(self.row) + i16::from(dr)).ok()?;
        Some(Position { column, row })
    }
}

/// A cell on the board arrangement
///
/// - `None`: Empty (or non-playable) cell
/// - `Some(CookieKind)`: Cell holding a cookie of that kind
pub type Cell = Option<CookieKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_level_defaults() {
        assert_eq!(NUM_COLUMNS, 9);
        assert_eq!(NUM_ROWS, 9);
        assert_eq!(MIN_CHAIN_LENGTH, 3);
        assert_eq!(BASE_CHAIN_SCORE, 60);
        assert_eq!(COOKIE_KIND_COUNT as usize, CookieKind::ALL.len());
        assert!(MIN_KIND_COUNT <= COOKIE_KIND_COUNT);
    }

    #[test]
    fn kind_string_roundtrip() {
        for kind in CookieKind::ALL {
            assert_eq!(CookieKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(CookieKind::from_str("SUGARCOOKIE"), Some(CookieKind::SugarCookie));
        assert_eq!(CookieKind::from_str("bagel"), None);
    }

    #[test]
    fn position_ordering_is_column_major() {
        assert!(Position::new(0, 8) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 2));
    }

    #[test]
    fn adjacency_is_orthogonal() {
        let p = Position::new(4, 4);
        assert!(p.is_adjacent(Position::new(3, 4)));
        assert!(!p.is_adjacent(Position::new(5, 5)));
        assert!(!p.is_adjacent(p));
        assert!(!Position::new(0, 0).is_adjacent(Position::new(255, 255)));
    }

    #[test]
    fn position_offset_stays_in_u8() {
        assert_eq!(Position::new(0, 0).offset(-1, 0), None);
        assert_eq!(Position::new(0, 0).offset(0, -1), None);
        assert_eq!(Position::new(1, 1).offset(1, 0), Some(Position::new(2, 1)));
        assert_eq!(Position::new(255, 0).offset(1, 0), None);
    }
}

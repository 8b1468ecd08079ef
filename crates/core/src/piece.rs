use crate::types::{CookieKind, Position};

/// Stable identity of a cookie for the lifetime of a board.
///
/// Ids are handed out in creation order and never reused, so a renderer can
/// follow the same cookie through swaps and falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(pub u32);

/// A cookie on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub kind: CookieKind,
    pub column: u8,
    pub row: u8,
}

impl Piece {
    pub fn position(&self) -> Position {
        Position::new(self.column, self.row)
    }
}

//! Match detection - run-length scans for chains of three or more
//!
//! Two full-board scans, one per axis, build [`Chain`]s that carry a snapshot
//! of their cookies (still valid after removal, for score popups). The point
//! query [`has_chain_at`] answers "does this cell sit in a run?" without
//! building chains, and works on any [`KindLookup`], including the scratch
//! [`Arrangement`](crate::board::Arrangement) used during swap analysis.

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{Cell, ChainAxis, CookieKind, Position, MIN_CHAIN_LENGTH};

/// Read-only view of the kinds on a grid.
///
/// `kind_at` returns `None` for empty and out-of-bounds cells alike.
pub trait KindLookup {
    fn columns(&self) -> u8;
    fn rows(&self) -> u8;
    fn kind_at(&self, position: Position) -> Cell;
}

/// A run of at least three same-kind cookies along one axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    axis: ChainAxis,
    kind: CookieKind,
    pieces: Vec<Piece>,
    score: u32,
}

impl Chain {
    fn new(axis: ChainAxis, kind: CookieKind, pieces: Vec<Piece>) -> Self {
        Self {
            axis,
            kind,
            pieces,
            score: 0,
        }
    }

    pub fn axis(&self) -> ChainAxis {
        self.axis
    }

    pub fn kind(&self) -> CookieKind {
        self.kind
    }

    /// Members in scan order (left to right, or bottom to top)
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn length(&self) -> usize {
        self.pieces.len()
    }

    /// Points awarded by the scorer; 0 until scored
    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn contains(&self, position: Position) -> bool {
        self.pieces.iter().any(|p| p.position() == position)
    }
}

/// Every horizontal chain, row by row from the bottom
pub fn detect_horizontal_matches(board: &Board) -> Vec<Chain> {
    let mut chains = Vec::new();
    for row in 0..board.rows() {
        let line: Vec<Position> = (0..board.columns()).map(|c| Position::new(c, row)).collect();
        scan_line(board, ChainAxis::Horizontal, &line, &mut chains);
    }
    chains
}

/// Every vertical chain, column by column from the left
pub fn detect_vertical_matches(board: &Board) -> Vec<Chain> {
    let mut chains = Vec::new();
    for column in 0..board.columns() {
        let line: Vec<Position> = (0..board.rows()).map(|r| Position::new(column, r)).collect();
        scan_line(board, ChainAxis::Vertical, &line, &mut chains);
    }
    chains
}

/// Horizontal chains followed by vertical chains (discovery order).
///
/// A cookie at the corner of an L or T shape appears in one chain of each axis.
pub fn detect_matches(board: &Board) -> Vec<Chain> {
    let mut chains = detect_horizontal_matches(board);
    chains.extend(detect_vertical_matches(board));
    chains
}

fn scan_line(board: &Board, axis: ChainAxis, line: &[Position], out: &mut Vec<Chain>) {
    let mut start = 0;
    while start < line.len() {
        let Some(kind) = board.kind_at(line[start]) else {
            start += 1;
            continue;
        };

        let mut end = start + 1;
        while end < line.len() && board.kind_at(line[end]) == Some(kind) {
            end += 1;
        }

        if end - start >= MIN_CHAIN_LENGTH {
            let pieces = line[start..end]
                .iter()
                .filter_map(|&p| board.get(p).copied())
                .collect();
            log::trace!(
                "{} chain of {} {} at {:?}",
                axis.as_str(),
                end - start,
                kind.as_str(),
                line[start]
            );
            out.push(Chain::new(axis, kind, pieces));
        }
        // Interior cells of a run are never re-examined
        start = end;
    }
}

/// Length of the same-kind run through `position` along `axis`.
/// Zero for an empty cell.
pub fn run_length_at<L: KindLookup + ?Sized>(
    lookup: &L,
    position: Position,
    axis: ChainAxis,
) -> usize {
    let Some(kind) = lookup.kind_at(position) else {
        return 0;
    };
    let (dc, dr) = match axis {
        ChainAxis::Horizontal => (1, 0),
        ChainAxis::Vertical => (0, 1),
    };
    1 + count_direction(lookup, position, kind, dc, dr)
        + count_direction(lookup, position, kind, -dc, -dr)
}

/// True if the cookie at `position` is part of a run of three or more in
/// either axis.
pub fn has_chain_at<L: KindLookup + ?Sized>(lookup: &L, position: Position) -> bool {
    run_length_at(lookup, position, ChainAxis::Horizontal) >= MIN_CHAIN_LENGTH
        || run_length_at(lookup, position, ChainAxis::Vertical) >= MIN_CHAIN_LENGTH
}

fn count_direction<L: KindLookup + ?Sized>(
    lookup: &L,
    start: Position,
    kind: CookieKind,
    dc: i8,
    dr: i8,
) -> usize {
    let mut count = 0;
    let mut current = start;
    while let Some(next) = current.offset(dc, dr) {
        if lookup.kind_at(next) != Some(kind) {
            break;
        }
        count += 1;
        current = next;
    }
    count
}

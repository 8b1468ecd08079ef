//! Error types for the simulation core
//!
//! Recoverable failures only. Sequencing mistakes by the caller (querying a
//! cell outside the grid, applying a non-adjacent swap) are contract
//! violations and panic instead.

use thiserror::Error;

use crate::types::Position;

/// Rules configuration or level shape rejected before a game is created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {columns}x{rows})")]
    EmptyDimensions { columns: u8, rows: u8 },
    #[error("kind count must be between {min} and {max} (got {found})")]
    KindCount { found: u8, min: u8, max: u8 },
    #[error("max_shuffle_attempts must be at least 1")]
    NoShuffleAttempts,
    #[error("max_cascade_steps must be at least 1")]
    NoCascadeSteps,
    #[error("level grid is {found_columns}x{found_rows}, rules expect {columns}x{rows}")]
    GridMismatch {
        columns: u8,
        rows: u8,
        found_columns: u8,
        found_rows: u8,
    },
}

/// Why a swap request was refused. The board is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("the level is already finished")]
    LevelFinished,
    #[error("cell ({}, {}) is outside the grid", .0.column, .0.row)]
    OutOfBounds(Position),
    #[error("cells ({}, {}) and ({}, {}) are not adjacent", .0.column, .0.row, .1.column, .1.row)]
    NotAdjacent(Position, Position),
    #[error("cell ({}, {}) holds no cookie", .0.column, .0.row)]
    EmptyCell(Position),
    #[error("swap does not create a chain")]
    NotLegal,
}

impl SwapError {
    /// Stable snake_case code for observers
    pub fn code(self) -> &'static str {
        match self {
            SwapError::LevelFinished => "level_finished",
            SwapError::OutOfBounds(_) => "out_of_bounds",
            SwapError::NotAdjacent(..) => "not_adjacent",
            SwapError::EmptyCell(_) => "empty_cell",
            SwapError::NotLegal => "invalid_swap",
        }
    }
}

/// Population could not produce a board with at least one legal swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShuffleError {
    #[error("no board with a legal swap found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Direct placement onto the board failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({}, {}) is outside the grid", .0.column, .0.row)]
    OutOfBounds(Position),
    #[error("cell ({}, {}) is not playable", .0.column, .0.row)]
    NotPlayable(Position),
    #[error("cell ({}, {}) is already occupied", .0.column, .0.row)]
    Occupied(Position),
}

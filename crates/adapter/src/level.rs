//! Level files - tile mask, target score, and move budget
//!
//! ```json
//! { "tiles": [[1, 1, 0], [1, 1, 1]], "targetScore": 1000, "moves": 15 }
//! ```
//!
//! `tiles` lists rows top row first, the way they read on screen. The board
//! counts rows from the bottom, so the loader flips them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use cookie_crunch_core::{Grid, LevelDefinition, RulesConfig};

use crate::types::Position;

/// Everything that can go wrong before a board exists
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read level file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level has {found} rows, expected {expected}")]
    RowCount { expected: u8, found: usize },
    #[error("level row {row} has {found} columns, expected {expected}")]
    ColumnCount { row: usize, expected: u8, found: usize },
    #[error("tile at row {row}, column {column} is {value}, expected 0 or 1")]
    TileValue { row: usize, column: usize, value: u32 },
    #[error("level has no playable tiles")]
    NoPlayableTiles,
    #[error("level target score must be above zero")]
    ZeroTarget,
    #[error("level must allow at least one move")]
    ZeroMoves,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LevelFile {
    tiles: Vec<Vec<u32>>,
    target_score: u32,
    moves: u32,
}

/// Parse a level document sized for `config`
pub fn load_level_str(json: &str, config: &RulesConfig) -> Result<LevelDefinition, LoadError> {
    let file: LevelFile = serde_json::from_str(json)?;
    let grid = build_grid(&file.tiles, config.columns, config.rows)?;
    // Either would decide the level before the first swap
    if file.target_score == 0 {
        return Err(LoadError::ZeroTarget);
    }
    if file.moves == 0 {
        return Err(LoadError::ZeroMoves);
    }
    log::info!(
        "loaded level: {} playable tiles, target {}, {} moves",
        grid.playable_count(),
        file.target_score,
        file.moves
    );
    Ok(LevelDefinition::new(grid, file.target_score, file.moves))
}

pub fn load_level_file(
    path: impl AsRef<Path>,
    config: &RulesConfig,
) -> Result<LevelDefinition, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_level_str(&json, config)
}

fn build_grid(tiles: &[Vec<u32>], columns: u8, rows: u8) -> Result<Grid, LoadError> {
    if tiles.len() != usize::from(rows) {
        return Err(LoadError::RowCount {
            expected: rows,
            found: tiles.len(),
        });
    }

    let mut grid = Grid::new(columns, rows);
    for (file_row, line) in tiles.iter().enumerate() {
        if line.len() != usize::from(columns) {
            return Err(LoadError::ColumnCount {
                row: file_row,
                expected: columns,
                found: line.len(),
            });
        }
        // File row 0 is the top of the board
        let row = rows - 1 - file_row as u8;
        for (column, &value) in line.iter().enumerate() {
            match value {
                0 => {}
                1 => grid.set_playable(Position::new(column as u8, row), true),
                _ => {
                    return Err(LoadError::TileValue {
                        row: file_row,
                        column,
                        value,
                    })
                }
            }
        }
    }

    if grid.playable_count() == 0 {
        return Err(LoadError::NoPlayableTiles);
    }
    Ok(grid)
}

//! Core game logic - pure, deterministic, and testable
//!
//! The simulation side of a match-3 cookie puzzle: the board and its cookies,
//! swap legality, chain detection, scoring, and the gravity/refill cascade.
//! Nothing here renders, sleeps, or reads files; a renderer drives it through
//! [`GameState`] and animates the reports it returns.
//!
//! # Module Structure
//!
//! - [`grid`]: playable-tile mask of a level
//! - [`board`]: cookies by stable id plus the cell slots pointing at them
//! - [`swaps`]: which adjacent exchanges would create a chain
//! - [`matcher`]: horizontal and vertical chain detection
//! - [`scoring`]: chain points and the per-turn combo multiplier
//! - [`cascade`]: removal, gravity, and top-up
//! - [`population`]: chain-free initial fill and bounded shuffling
//! - [`game_state`]: one level from first shuffle to win or loss
//! - [`rng`]: seedable generator for reproducible games
//!
//! # Game Rules
//!
//! - A swap is legal only if it leaves a run of three or more at one of the
//!   two cells it touches.
//! - A chain of `n` cookies scores `60 * (n - 2)` times the combo multiplier,
//!   which starts at 1 each turn and grows with every chain in the cascade.
//! - After removal, cookies fall straight down and new ones drop in from above
//!   until every playable cell is filled again.
//! - When no legal swap remains, the board is reshuffled for free.
//!
//! # Example
//!
//! ```
//! use cookie_crunch_core::{GameState, Grid, LevelDefinition, RulesConfig};
//!
//! let level = LevelDefinition::new(Grid::filled(9, 9), 1000, 15);
//! let mut game = GameState::with_seed(level, RulesConfig::default(), 12345).unwrap();
//! game.begin_game().unwrap();
//!
//! let hint = game.hint().unwrap();
//! let report = game.try_swap(hint.first(), hint.second()).unwrap();
//! assert!(report.turn_score >= 60);
//! assert_eq!(game.moves_left(), 14);
//! ```

pub mod board;
pub mod cascade;
pub mod config;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod matcher;
pub mod piece;
pub mod population;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod swaps;

pub use cookie_crunch_types as types;

// Re-export commonly used types for convenience
pub use board::{Arrangement, Board};
pub use cascade::{fill_holes, remove_matches, top_up, Fall, Spawn};
pub use config::RulesConfig;
pub use error::{BoardError, ConfigError, ShuffleError, SwapError};
pub use game_state::{CascadeStep, GameState, LevelDefinition, TurnReport};
pub use grid::Grid;
pub use matcher::{
    detect_horizontal_matches, detect_matches, detect_vertical_matches, has_chain_at, Chain,
    KindLookup,
};
pub use piece::{Piece, PieceId};
pub use population::{populate, shuffle};
pub use rng::SimpleRng;
pub use scoring::{calculate_chain_score, Scorer};
pub use snapshot::{GameSnapshot, LevelOutcome};
pub use swaps::{detect_possible_swaps, PossibleSwaps, Swap};

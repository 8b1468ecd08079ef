//! Game state module - one level from first shuffle to win or loss
//!
//! Ties the board, swap analysis, cascade resolution and scoring together and
//! keeps the per-level bookkeeping: score, moves left, and the legal swaps for
//! the current arrangement. All randomness comes from the injected generator,
//! so a fixed seed replays the same game.

use rand::RngCore;

use crate::board::Board;
use crate::cascade::{fill_holes, remove_matches, top_up, Fall, Spawn};
use crate::config::RulesConfig;
use crate::error::{ConfigError, ShuffleError, SwapError};
use crate::grid::Grid;
use crate::matcher::{detect_matches, Chain};
use crate::piece::{Piece, PieceId};
use crate::population;
use crate::rng::SimpleRng;
use crate::scoring::Scorer;
use crate::snapshot::{GameSnapshot, LevelOutcome};
use crate::swaps::{detect_possible_swaps, PossibleSwaps, Swap};
use crate::types::Position;

/// What a level asks of the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    pub grid: Grid,
    pub target_score: u32,
    pub maximum_moves: u32,
}

impl LevelDefinition {
    pub fn new(grid: Grid, target_score: u32, maximum_moves: u32) -> Self {
        Self {
            grid,
            target_score,
            maximum_moves,
        }
    }
}

/// One detect/remove/fall/refill pass of a cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// Scored chains, horizontal first
    pub chains: Vec<Chain>,
    pub falls: Vec<Vec<Fall>>,
    pub spawns: Vec<Vec<Spawn>>,
    /// Sum of the chain scores in this pass
    pub score: u32,
}

/// Everything that happened during one accepted swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub swap: Swap,
    /// Ids of the two swapped cookies, lower position first
    pub moved: (PieceId, PieceId),
    pub steps: Vec<CascadeStep>,
    pub turn_score: u32,
    pub score: u32,
    pub moves_left: u32,
    /// No legal swap remains; call [`GameState::shuffle`] before the next turn
    pub needs_shuffle: bool,
    pub outcome: LevelOutcome,
}

impl TurnReport {
    pub fn chain_count(&self) -> usize {
        self.steps.iter().map(|s| s.chains.len()).sum()
    }
}

/// Complete state of a level in play
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    possible_swaps: PossibleSwaps,
    scorer: Scorer,
    config: RulesConfig,
    rng: R,
    score: u32,
    target_score: u32,
    moves_left: u32,
    maximum_moves: u32,
    turns: u32,
}

impl GameState<SimpleRng> {
    /// Create a game driven by the built-in generator
    pub fn with_seed(
        level: LevelDefinition,
        config: RulesConfig,
        seed: u32,
    ) -> Result<Self, ConfigError> {
        Self::new(level, config, SimpleRng::new(seed))
    }
}

impl<R: RngCore> GameState<R> {
    /// Create a game over an empty board. Call [`begin_game`](Self::begin_game)
    /// to place the first cookies.
    pub fn new(level: LevelDefinition, config: RulesConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        check_dimensions(&config, &level.grid)?;

        Ok(Self {
            board: Board::new(level.grid),
            possible_swaps: PossibleSwaps::default(),
            scorer: Scorer::new(),
            config,
            rng,
            score: 0,
            target_score: level.target_score,
            moves_left: level.maximum_moves,
            maximum_moves: level.maximum_moves,
            turns: 0,
        })
    }

    /// Reset score and moves, then shuffle in the first arrangement
    pub fn begin_game(&mut self) -> Result<Vec<Piece>, ShuffleError> {
        self.score = 0;
        self.turns = 0;
        self.moves_left = self.maximum_moves;
        self.scorer.reset_combo_multiplier();

        let created = self.shuffle()?;
        log::info!(
            "game started: {}x{} board, target {}, {} moves, {} legal swaps",
            self.board.columns(),
            self.board.rows(),
            self.target_score,
            self.maximum_moves,
            self.possible_swaps.len()
        );
        Ok(created)
    }

    /// Replace every cookie with a fresh arrangement that has a legal swap.
    /// Does not cost a move.
    pub fn shuffle(&mut self) -> Result<Vec<Piece>, ShuffleError> {
        let result = population::shuffle(
            &mut self.board,
            &mut self.rng,
            self.config.kind_count,
            self.config.max_shuffle_attempts,
        );
        match result {
            Ok((created, swaps)) => {
                self.possible_swaps = swaps;
                Ok(created)
            }
            Err(err) => {
                self.possible_swaps = PossibleSwaps::default();
                Err(err)
            }
        }
    }

    /// Install a prepared arrangement, e.g. a saved or synthetic board.
    /// Score and moves are left as they are.
    pub fn load_board(&mut self, board: Board) -> Result<(), ConfigError> {
        check_dimensions(&self.config, board.grid())?;
        self.board = board;
        self.possible_swaps = detect_possible_swaps(&self.board);
        Ok(())
    }

    /// Validate and play one swap, resolving the whole cascade it triggers.
    ///
    /// A rejected request changes nothing.
    pub fn try_swap(&mut self, from: Position, to: Position) -> Result<TurnReport, SwapError> {
        if self.outcome().is_finished() {
            return Err(SwapError::LevelFinished);
        }
        for position in [from, to] {
            if !self.board.grid().contains(position) {
                return Err(SwapError::OutOfBounds(position));
            }
        }
        if !from.is_adjacent(to) {
            return Err(SwapError::NotAdjacent(from, to));
        }
        for position in [from, to] {
            if !self.board.is_occupied(position) {
                return Err(SwapError::EmptyCell(position));
            }
        }
        let swap = Swap::new(from, to);
        if !self.possible_swaps.is_legal(&swap) {
            return Err(SwapError::NotLegal);
        }

        self.scorer.reset_combo_multiplier();
        let moved = self.board.apply_swap(&swap).ok_or(SwapError::EmptyCell(from))?;
        let steps = self.resolve_cascade();

        let turn_score = steps.iter().fold(0u32, |acc, s| acc.saturating_add(s.score));
        self.score = self.score.saturating_add(turn_score);
        self.moves_left = self.moves_left.saturating_sub(1);
        self.turns += 1;
        self.possible_swaps = detect_possible_swaps(&self.board);

        let outcome = self.outcome();
        log::debug!(
            "turn {}: {} steps, +{} (total {}), {} moves left, {} legal swaps",
            self.turns,
            steps.len(),
            turn_score,
            self.score,
            self.moves_left,
            self.possible_swaps.len()
        );

        Ok(TurnReport {
            swap,
            moved,
            steps,
            turn_score,
            score: self.score,
            moves_left: self.moves_left,
            needs_shuffle: self.possible_swaps.is_empty(),
            outcome,
        })
    }

    fn resolve_cascade(&mut self) -> Vec<CascadeStep> {
        let mut steps = Vec::new();
        for _ in 0..self.config.max_cascade_steps {
            let chains = remove_matches(&mut self.board, &mut self.scorer);
            if chains.is_empty() {
                return steps;
            }
            let score = chains.iter().fold(0u32, |acc, c| acc.saturating_add(c.score()));
            let falls = fill_holes(&mut self.board);
            let spawns = top_up(&mut self.board, &mut self.rng, self.config.kind_count);
            log::debug!(
                "cascade step {}: {} chains for {}",
                steps.len() + 1,
                chains.len(),
                score
            );
            steps.push(CascadeStep {
                chains,
                falls,
                spawns,
                score,
            });
        }

        if !detect_matches(&self.board).is_empty() {
            log::warn!(
                "cascade stopped after {} steps with chains still on the board",
                self.config.max_cascade_steps
            );
        }
        steps
    }

    /// Recompute the legal set from the current arrangement
    pub fn detect_possible_swaps(&mut self) -> &PossibleSwaps {
        self.possible_swaps = detect_possible_swaps(&self.board);
        &self.possible_swaps
    }

    pub fn possible_swaps(&self) -> &PossibleSwaps {
        &self.possible_swaps
    }

    pub fn is_legal(&self, swap: &Swap) -> bool {
        self.possible_swaps.is_legal(swap)
    }

    pub fn hint(&self) -> Option<Swap> {
        self.possible_swaps.hint()
    }

    pub fn needs_shuffle(&self) -> bool {
        self.possible_swaps.is_empty()
    }

    pub fn outcome(&self) -> LevelOutcome {
        if self.score >= self.target_score {
            LevelOutcome::Won
        } else if self.moves_left == 0 {
            LevelOutcome::Lost
        } else {
            LevelOutcome::InProgress
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn maximum_moves(&self) -> u32 {
        self.maximum_moves
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.scorer.combo_multiplier()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill `out` in place, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        let grid = self.board.grid();
        out.columns = grid.columns();
        out.rows = grid.rows();
        out.tiles.extend(grid.positions().map(|p| grid.is_playable(p)));
        out.cells.extend(grid.positions().map(|p| self.board.get(p).copied()));
        out.score = self.score;
        out.target_score = self.target_score;
        out.moves_left = self.moves_left;
        out.maximum_moves = self.maximum_moves;
        out.combo_multiplier = self.scorer.combo_multiplier();
        out.legal_swaps = self.possible_swaps.len();
        out.turns = self.turns;
        out.outcome = self.outcome();
    }
}

fn check_dimensions(config: &RulesConfig, grid: &Grid) -> Result<(), ConfigError> {
    if grid.columns() != config.columns || grid.rows() != config.rows {
        return Err(ConfigError::GridMismatch {
            columns: config.columns,
            rows: config.rows,
            found_columns: grid.columns(),
            found_rows: grid.rows(),
        });
    }
    Ok(())
}

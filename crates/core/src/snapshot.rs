use crate::piece::Piece;
use crate::types::Position;

/// Where a level stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelOutcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl LevelOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            LevelOutcome::InProgress => "in_progress",
            LevelOutcome::Won => "won",
            LevelOutcome::Lost => "lost",
        }
    }

    pub fn is_finished(self) -> bool {
        self != LevelOutcome::InProgress
    }
}

/// Plain-data copy of everything a renderer needs for one frame.
///
/// `tiles` and `cells` are raster order, row 0 (the bottom) first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub columns: u8,
    pub rows: u8,
    pub tiles: Vec<bool>,
    pub cells: Vec<Option<Piece>>,
    pub score: u32,
    pub target_score: u32,
    pub moves_left: u32,
    pub maximum_moves: u32,
    pub combo_multiplier: u32,
    pub legal_swaps: usize,
    pub turns: u32,
    pub outcome: LevelOutcome,
}

impl GameSnapshot {
    /// Reset to the empty state, keeping allocated capacity
    pub fn clear(&mut self) {
        self.columns = 0;
        self.rows = 0;
        self.tiles.clear();
        self.cells.clear();
        self.score = 0;
        self.target_score = 0;
        self.moves_left = 0;
        self.maximum_moves = 0;
        self.combo_multiplier = 1;
        self.legal_swaps = 0;
        self.turns = 0;
        self.outcome = LevelOutcome::InProgress;
    }

    fn index(&self, position: Position) -> Option<usize> {
        (position.column < self.columns && position.row < self.rows)
            .then(|| position.row as usize * self.columns as usize + position.column as usize)
    }

    pub fn is_playable(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.tiles[i])
    }

    pub fn cell(&self, position: Position) -> Option<Piece> {
        self.index(position).and_then(|i| self.cells[i])
    }

    pub fn playable(&self) -> bool {
        !self.outcome.is_finished()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            columns: 0,
            rows: 0,
            tiles: Vec::new(),
            cells: Vec::new(),
            score: 0,
            target_score: 0,
            moves_left: 0,
            maximum_moves: 0,
            combo_multiplier: 1,
            legal_swaps: 0,
            turns: 0,
            outcome: LevelOutcome::InProgress,
        };
        s.clear();
        s
    }
}

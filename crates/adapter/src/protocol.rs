//! Protocol module - JSON messages for a presentation layer
//!
//! Outbound only. Every message carries `type` and `seq`; cookie kinds, chain
//! axes and outcomes are lowercase strings. Tile rows are listed top row
//! first, the same way level files write them.

use serde::{Serialize, Serializer};

use cookie_crunch_core::{
    CascadeStep, Chain, Fall, GameSnapshot, LevelOutcome, Piece, Spawn, Swap, SwapError, TurnReport,
};

use crate::types::{ChainAxis, CookieKind, Position};

fn kind_str<S: Serializer>(kind: &CookieKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(kind.as_str())
}

fn axis_str<S: Serializer>(axis: &ChainAxis, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(axis.as_str())
}

fn outcome_str<S: Serializer>(outcome: &LevelOutcome, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(outcome.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TurnType {
    #[serde(rename = "turn")]
    Turn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShuffleType {
    #[serde(rename = "shuffle")]
    Shuffle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HintType {
    #[serde(rename = "hint")]
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WirePosition {
    pub column: u8,
    pub row: u8,
}

impl From<Position> for WirePosition {
    fn from(p: Position) -> Self {
        Self {
            column: p.column,
            row: p.row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WireSwap {
    pub first: WirePosition,
    pub second: WirePosition,
}

impl From<Swap> for WireSwap {
    fn from(s: Swap) -> Self {
        Self {
            first: s.first().into(),
            second: s.second().into(),
        }
    }
}

/// A cookie with its id, kind and cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WirePiece {
    pub id: u32,
    #[serde(serialize_with = "kind_str")]
    pub kind: CookieKind,
    pub column: u8,
    pub row: u8,
}

impl From<&Piece> for WirePiece {
    fn from(p: &Piece) -> Self {
        Self {
            id: p.id.0,
            kind: p.kind,
            column: p.column,
            row: p.row,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireChain {
    #[serde(serialize_with = "axis_str")]
    pub axis: ChainAxis,
    #[serde(serialize_with = "kind_str")]
    pub kind: CookieKind,
    pub score: u32,
    pub cells: Vec<WirePiece>,
}

impl From<&Chain> for WireChain {
    fn from(c: &Chain) -> Self {
        Self {
            axis: c.axis(),
            kind: c.kind(),
            score: c.score(),
            cells: c.pieces().iter().map(WirePiece::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WireFall {
    pub id: u32,
    pub column: u8,
    pub from_row: u8,
    pub to_row: u8,
}

impl From<&Fall> for WireFall {
    fn from(f: &Fall) -> Self {
        Self {
            id: f.piece.0,
            column: f.column,
            from_row: f.from_row,
            to_row: f.to_row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WireSpawn {
    pub id: u32,
    #[serde(serialize_with = "kind_str")]
    pub kind: CookieKind,
    pub column: u8,
    pub from_row: u8,
    pub to_row: u8,
}

impl From<&Spawn> for WireSpawn {
    fn from(s: &Spawn) -> Self {
        Self {
            id: s.piece.0,
            kind: s.kind,
            column: s.column,
            from_row: s.from_row,
            to_row: s.to_row,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireStep {
    pub chains: Vec<WireChain>,
    /// Per column, in board column order
    pub falls: Vec<Vec<WireFall>>,
    pub spawns: Vec<Vec<WireSpawn>>,
    pub score: u32,
}

impl From<&CascadeStep> for WireStep {
    fn from(step: &CascadeStep) -> Self {
        Self {
            chains: step.chains.iter().map(WireChain::from).collect(),
            falls: step
                .falls
                .iter()
                .map(|column| column.iter().map(WireFall::from).collect())
                .collect(),
            spawns: step
                .spawns
                .iter()
                .map(|column| column.iter().map(WireSpawn::from).collect())
                .collect(),
            score: step.score,
        }
    }
}

/// Full board state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub columns: u8,
    pub rows: u8,
    /// 1 for playable, 0 otherwise; top row first
    pub tiles: Vec<Vec<u8>>,
    /// Occupied cells only, raster order from the bottom row
    pub cells: Vec<WirePiece>,
    pub score: u32,
    pub target_score: u32,
    pub moves_left: u32,
    pub maximum_moves: u32,
    pub combo_multiplier: u32,
    pub legal_swaps: usize,
    pub turns: u32,
    #[serde(serialize_with = "outcome_str")]
    pub outcome: LevelOutcome,
}

impl ObservationMessage {
    pub fn from_snapshot(seq: u64, snap: &GameSnapshot) -> Self {
        let tiles = (0..snap.rows)
            .rev()
            .map(|row| {
                (0..snap.columns)
                    .map(|column| u8::from(snap.is_playable(Position::new(column, row))))
                    .collect()
            })
            .collect();

        Self {
            msg_type: ObservationType::Observation,
            seq,
            columns: snap.columns,
            rows: snap.rows,
            tiles,
            cells: snap.cells.iter().flatten().map(WirePiece::from).collect(),
            score: snap.score,
            target_score: snap.target_score,
            moves_left: snap.moves_left,
            maximum_moves: snap.maximum_moves,
            combo_multiplier: snap.combo_multiplier,
            legal_swaps: snap.legal_swaps,
            turns: snap.turns,
            outcome: snap.outcome,
        }
    }
}

/// One accepted swap and the cascade it caused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnMessage {
    #[serde(rename = "type")]
    pub msg_type: TurnType,
    pub seq: u64,
    pub swap: WireSwap,
    pub steps: Vec<WireStep>,
    pub turn_score: u32,
    pub score: u32,
    pub moves_left: u32,
    pub needs_shuffle: bool,
    #[serde(serialize_with = "outcome_str")]
    pub outcome: LevelOutcome,
}

impl TurnMessage {
    pub fn from_report(seq: u64, report: &TurnReport) -> Self {
        Self {
            msg_type: TurnType::Turn,
            seq,
            swap: report.swap.into(),
            steps: report.steps.iter().map(WireStep::from).collect(),
            turn_score: report.turn_score,
            score: report.score,
            moves_left: report.moves_left,
            needs_shuffle: report.needs_shuffle,
            outcome: report.outcome,
        }
    }
}

/// Cookies created by a (re)shuffle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShuffleMessage {
    #[serde(rename = "type")]
    pub msg_type: ShuffleType,
    pub seq: u64,
    pub pieces: Vec<WirePiece>,
    pub legal_swaps: usize,
}

impl ShuffleMessage {
    pub fn new(seq: u64, pieces: &[Piece], legal_swaps: usize) -> Self {
        Self {
            msg_type: ShuffleType::Shuffle,
            seq,
            pieces: pieces.iter().map(WirePiece::from).collect(),
            legal_swaps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HintMessage {
    #[serde(rename = "type")]
    pub msg_type: HintType,
    pub seq: u64,
    pub swap: Option<WireSwap>,
}

impl HintMessage {
    pub fn new(seq: u64, swap: Option<Swap>) -> Self {
        Self {
            msg_type: HintType::Hint,
            seq,
            swap: swap.map(WireSwap::from),
        }
    }
}

/// A refused swap request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: &'static str,
    pub message: String,
}

impl ErrorMessage {
    pub fn from_swap_error(seq: u64, err: SwapError) -> Self {
        Self {
            msg_type: ErrorType::Error,
            seq,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

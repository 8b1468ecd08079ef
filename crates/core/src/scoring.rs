//! Scoring module - chain points and the per-turn combo multiplier
//!
//! A 3-chain is worth 60, a 4-chain 120, a 5-chain 180, and so on, times the
//! combo multiplier. Every chain scored during one turn's cascade bumps the
//! multiplier, so the second chain of a turn scores double, the third triple.
//! The multiplier only resets when a new turn (or game) begins.

use crate::matcher::Chain;
use crate::types::{BASE_CHAIN_SCORE, MIN_CHAIN_LENGTH};

/// Base points for a chain of `length` cookies before the multiplier
pub fn calculate_chain_score(length: usize) -> u32 {
    if length < MIN_CHAIN_LENGTH {
        return 0;
    }
    let extra = u32::try_from(length - (MIN_CHAIN_LENGTH - 1)).unwrap_or(u32::MAX);
    BASE_CHAIN_SCORE.saturating_mul(extra)
}

/// Owns the combo multiplier's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorer {
    combo_multiplier: u32,
}

impl Scorer {
    pub fn new() -> Self {
        Self { combo_multiplier: 1 }
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    /// Called at the start of every player turn
    pub fn reset_combo_multiplier(&mut self) {
        self.combo_multiplier = 1;
    }

    /// Score `chains` in order, each with the next multiplier value.
    /// Returns the sum awarded.
    pub fn score_chains(&mut self, chains: &mut [Chain]) -> u32 {
        let mut total: u32 = 0;
        for chain in chains.iter_mut() {
            let score = calculate_chain_score(chain.length()).saturating_mul(self.combo_multiplier);
            chain.set_score(score);
            total = total.saturating_add(score);
            log::trace!(
                "{} chain of {} scored {} (x{})",
                chain.axis().as_str(),
                chain.length(),
                score,
                self.combo_multiplier
            );
            self.combo_multiplier = self.combo_multiplier.saturating_add(1);
        }
        total
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::grid::Grid;
    use crate::matcher::detect_matches;
    use crate::types::{CookieKind, Position};

    #[test]
    fn test_chain_scores() {
        assert_eq!(calculate_chain_score(0), 0);
        assert_eq!(calculate_chain_score(2), 0);
        assert_eq!(calculate_chain_score(3), 60);
        assert_eq!(calculate_chain_score(4), 120);
        assert_eq!(calculate_chain_score(5), 180);
        assert_eq!(calculate_chain_score(9), 420);
    }

    #[test]
    fn test_isolated_three_chain_scores_60() {
        let board = Board::from_kinds(Grid::filled(3, 1), |_| Some(CookieKind::Danish));
        let mut chains = detect_matches(&board);
        let mut scorer = Scorer::new();

        assert_eq!(scorer.score_chains(&mut chains), 60);
        assert_eq!(chains[0].score(), 60);
        assert_eq!(scorer.combo_multiplier(), 2);
    }

    #[test]
    fn test_simultaneous_chains_use_consecutive_multipliers() {
        // Row 0: four donuts; column 4: three cupcakes stacked on rows 0..2
        let board = Board::from_kinds(Grid::filled(5, 3), |p| match (p.column, p.row) {
            (0..=3, 0) => Some(CookieKind::Donut),
            (4, _) => Some(CookieKind::Cupcake),
            _ => None,
        });
        let mut chains = detect_matches(&board);
        assert_eq!(chains.len(), 2);

        let mut scorer = Scorer::new();
        let total = scorer.score_chains(&mut chains);

        // Horizontal 4-chain first at x1, then the vertical 3-chain at x2
        assert_eq!(chains[0].score(), 120);
        assert_eq!(chains[1].score(), 120);
        assert_eq!(total, 240);
        assert!(chains[1].contains(Position::new(4, 2)));

        scorer.reset_combo_multiplier();
        assert_eq!(scorer.combo_multiplier(), 1);
    }

    #[test]
    fn test_multiplier_carries_across_passes() {
        let board = Board::from_kinds(Grid::filled(3, 1), |_| Some(CookieKind::Macaroon));
        let mut scorer = Scorer::new();

        let mut first = detect_matches(&board);
        scorer.score_chains(&mut first);
        let mut second = detect_matches(&board);
        scorer.score_chains(&mut second);

        assert_eq!(first[0].score(), 60);
        assert_eq!(second[0].score(), 120);
        assert_eq!(scorer.combo_multiplier(), 3);
    }
}

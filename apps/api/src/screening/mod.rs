//! Screening core — pure, synchronous candidate evaluation.
//!
//! Everything in this tree is DB-free and side-effect-free: normalization of
//! messy submission fields, feature extraction, weighted scoring against a
//! target-skill vocabulary, greedy diversity-aware shortlist selection, and
//! human-readable justifications. Callers own persistence and must hand batch
//! operations a single materialized snapshot (bounds and features computed
//! from the same candidate set, never interleaved with writes).

pub mod features;
pub mod normalize;
pub mod reason;
pub mod scoring;
pub mod selector;

use self::scoring::{ScoringWeights, TargetSkills};
use self::selector::SelectionPolicy;

/// Configuration bundle for one screening run: the vocabulary, the score
/// weights, the selection policy, and the shortlist size.
#[derive(Debug, Clone)]
pub struct ScreeningOptions {
    pub target_skills: TargetSkills,
    pub weights: ScoringWeights,
    pub policy: SelectionPolicy,
    pub select_count: usize,
}

impl Default for ScreeningOptions {
    fn default() -> Self {
        Self {
            target_skills: TargetSkills::default(),
            weights: ScoringWeights::default(),
            policy: SelectionPolicy::default(),
            select_count: 5,
        }
    }
}

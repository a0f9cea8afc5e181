//! Diversity-aware shortlist selection.
//!
//! Greedy single pass over score-ranked candidates: the top candidate is
//! always taken, later ones only if their skills do not overlap too heavily
//! with everyone already chosen (with escape hatches for the first two slots
//! and for very high scores), then a backfill pass tops the list up to k.

use crate::screening::features::CandidateFeatures;

/// One candidate with its batch score attached. Identity is the stable row id.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub id: i64,
    pub name: String,
    pub features: CandidateFeatures,
    pub score: f64,
}

/// Tunable acceptance policy. The defaults (overlap below 3, score above 85)
/// reproduce the established shortlist behavior; they are policy knobs, not
/// structural invariants.
#[derive(Debug, Clone, Copy)]
pub struct SelectionPolicy {
    /// Accept while total skill overlap with all chosen candidates is below this.
    pub max_skill_overlap: usize,
    /// Accept regardless of overlap above this score.
    pub score_override: f64,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            max_skill_overlap: 3,
            score_override: 85.0,
        }
    }
}

/// Picks up to k candidates balancing score and skill diversity.
///
/// Candidates are ranked by score descending (stable: ties keep input order).
/// The returned order is acceptance order, which is what the service persists
/// and reports; it is deterministic for a given input order.
pub fn select_diverse(
    candidates: &[ScoredCandidate],
    k: usize,
    policy: SelectionPolicy,
) -> Vec<ScoredCandidate> {
    if k == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&ScoredCandidate> = candidates.iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut chosen: Vec<&ScoredCandidate> = Vec::new();
    for &candidate in &ranked {
        if chosen.len() >= k {
            break;
        }
        if chosen.is_empty() {
            chosen.push(candidate);
            continue;
        }
        let overlap: usize = chosen
            .iter()
            .map(|picked| {
                candidate
                    .features
                    .skill_set
                    .intersection(&picked.features.skill_set)
                    .count()
            })
            .sum();
        if overlap < policy.max_skill_overlap
            || chosen.len() < 2
            || candidate.score > policy.score_override
        {
            chosen.push(candidate);
        }
    }

    // Backfill: a diverse pass that came up short still returns k candidates.
    let mut i = 0;
    while chosen.len() < k && i < ranked.len() {
        if !chosen.iter().any(|picked| picked.id == ranked[i].id) {
            chosen.push(ranked[i]);
        }
        i += 1;
    }

    chosen.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: i64, score: f64, skills: &[&str]) -> ScoredCandidate {
        ScoredCandidate {
            id,
            name: format!("candidate-{id}"),
            features: CandidateFeatures {
                skills: skills.iter().map(|s| s.to_string()).collect(),
                skill_set: skills.iter().map(|s| s.to_lowercase()).collect(),
                ..CandidateFeatures::default()
            },
            score,
        }
    }

    #[test]
    fn empty_population_or_zero_k_selects_nothing() {
        assert!(select_diverse(&[], 5, SelectionPolicy::default()).is_empty());
        let pool = vec![candidate(1, 90.0, &["python"])];
        assert!(select_diverse(&pool, 0, SelectionPolicy::default()).is_empty());
    }

    #[test]
    fn returns_min_of_k_and_population() {
        let pool: Vec<_> = (0..3)
            .map(|i| candidate(i, 50.0 + i as f64, &[]))
            .collect();
        assert_eq!(select_diverse(&pool, 5, SelectionPolicy::default()).len(), 3);
        assert_eq!(select_diverse(&pool, 2, SelectionPolicy::default()).len(), 2);
    }

    #[test]
    fn highest_scorer_is_always_included() {
        let pool = vec![
            candidate(1, 40.0, &["python"]),
            candidate(2, 99.9, &["python"]),
            candidate(3, 60.0, &["python"]),
        ];
        let chosen = select_diverse(&pool, 1, SelectionPolicy::default());
        assert_eq!(chosen[0].id, 2);
    }

    #[test]
    fn disjoint_skills_yield_pure_top_k_in_score_order() {
        let scores = [95.0, 90.0, 88.0, 85.0, 80.0, 75.0, 70.0, 65.0, 60.0, 55.0];
        let pool: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                let skill = format!("skill-{i}");
                candidate(i as i64, score, &[skill.as_str()])
            })
            .collect();

        let chosen = select_diverse(&pool, 5, SelectionPolicy::default());
        let ids: Vec<i64> = chosen.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        let picked_scores: Vec<f64> = chosen.iter().map(|c| c.score).collect();
        assert_eq!(picked_scores, vec![95.0, 90.0, 88.0, 85.0, 80.0]);
    }

    #[test]
    fn second_slot_accepts_despite_full_overlap() {
        // identical skill sets of size >= 3; fewer-than-2-chosen exception applies
        let skills = ["python", "sql", "docker"];
        let pool = vec![
            candidate(1, 90.0, &skills),
            candidate(2, 80.0, &skills),
        ];
        let chosen = select_diverse(&pool, 2, SelectionPolicy::default());
        assert_eq!(chosen.len(), 2);
        assert_eq!(chosen[0].id, 1);
        assert_eq!(chosen[1].id, 2);
    }

    #[test]
    fn heavy_overlap_is_skipped_then_backfilled() {
        let shared = ["python", "sql", "docker"];
        let pool = vec![
            candidate(1, 90.0, &shared),
            candidate(2, 85.0, &shared),
            candidate(3, 80.0, &shared),
            candidate(4, 75.0, &["rust"]),
        ];
        let chosen = select_diverse(&pool, 3, SelectionPolicy::default());
        // 1 and 2 take the free slots; 3 overlaps 6 with them and is skipped
        // in the diverse pass, so the disjoint 4 is accepted, and no backfill
        // is needed.
        let ids: Vec<i64> = chosen.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn backfill_restores_k_when_diversity_runs_dry() {
        let shared = ["python", "sql", "docker"];
        let pool = vec![
            candidate(1, 90.0, &shared),
            candidate(2, 85.0, &shared),
            candidate(3, 80.0, &shared),
            candidate(4, 75.0, &shared),
        ];
        let chosen = select_diverse(&pool, 4, SelectionPolicy::default());
        assert_eq!(chosen.len(), 4, "population >= k must fill to exactly k");
        // diverse pass takes 1 and 2, skips 3 and 4; backfill appends them in
        // score order after the accepted ones
        let ids: Vec<i64> = chosen.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn high_score_overrides_overlap() {
        let shared = ["python", "sql", "docker"];
        let pool = vec![
            candidate(1, 95.0, &shared),
            candidate(2, 92.0, &shared),
            candidate(3, 90.0, &shared),
            candidate(4, 50.0, &["rust"]),
        ];
        let chosen = select_diverse(&pool, 3, SelectionPolicy::default());
        // candidate 3 overlaps heavily but clears the score override
        let ids: Vec<i64> = chosen.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let pool = vec![
            candidate(10, 80.0, &["a"]),
            candidate(11, 80.0, &["b"]),
            candidate(12, 80.0, &["c"]),
        ];
        let chosen = select_diverse(&pool, 3, SelectionPolicy::default());
        let ids: Vec<i64> = chosen.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[test]
    fn policy_knobs_change_acceptance() {
        let shared = ["python", "sql", "docker"];
        let pool = vec![
            candidate(1, 90.0, &shared),
            candidate(2, 85.0, &shared),
            candidate(3, 80.0, &shared),
        ];
        let permissive = SelectionPolicy {
            max_skill_overlap: 100,
            score_override: 85.0,
        };
        let chosen = select_diverse(&pool, 3, permissive);
        assert_eq!(chosen.len(), 3);
        let ids: Vec<i64> = chosen.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}

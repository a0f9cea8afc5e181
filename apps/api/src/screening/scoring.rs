//! Weighted candidate scoring.
//!
//! Five sub-scores in [0, 1] — skills, experience, education, availability,
//! salary — combine into a 0–100 score rounded to two decimals. The salary
//! sub-score needs population-wide bounds, so scoring is a batch operation:
//! callers compute [`SalaryBounds`] over one consistent snapshot and pass the
//! same bounds to every candidate in that batch.

use std::collections::HashSet;

use crate::screening::features::CandidateFeatures;
use crate::screening::normalize::round2;

/// Default target-skill vocabulary: the competencies the screening pipeline
/// is hiring for. Overridable per run via [`TargetSkills::new`].
pub const DEFAULT_TARGET_SKILLS: &[&str] = &[
    "python",
    "llms",
    "prompt engineering",
    "flask",
    "fastapi",
    "sql",
    "docker",
    "aws",
    "gcp",
    "airflow",
    "annotation tooling",
    "react",
    "next.js",
    "java",
    "c++",
    "ci/cd",
    "mysql",
    "postgres",
    "kubernetes",
];

/// Target-skill vocabulary carried as an explicit configuration value rather
/// than a process-wide constant, so tests and tenants can swap it out.
#[derive(Debug, Clone)]
pub struct TargetSkills {
    skills: Vec<String>,
}

impl TargetSkills {
    /// Builds a vocabulary from arbitrary tokens; entries are trimmed and
    /// lower-cased, empties dropped. Order is preserved.
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            skills: skills
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Number of vocabulary skills present in the candidate's skill set.
    pub fn matches(&self, skill_set: &HashSet<String>) -> usize {
        self.skills.iter().filter(|s| skill_set.contains(*s)).count()
    }
}

impl Default for TargetSkills {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_SKILLS.iter().copied())
    }
}

/// Fixed sub-score weights. Must sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
    pub availability: f64,
    pub salary: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.40,
            experience: 0.20,
            education: 0.10,
            availability: 0.15,
            salary: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.experience + self.education + self.availability + self.salary
    }
}

/// Population-wide salary bounds for the batch being scored together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBounds {
    pub min: i64,
    pub max: i64,
}

impl SalaryBounds {
    /// Bounds over a full candidate snapshot. Absent salaries count as zero,
    /// and an empty population yields (0, 1) so every salary sub-score lands
    /// on the neutral 0.5 via the max == min rule downstream of it.
    pub fn from_population<I>(salaries: I) -> Self
    where
        I: IntoIterator<Item = Option<i64>>,
    {
        let mut iter = salaries.into_iter().map(|s| s.unwrap_or(0));
        let Some(first) = iter.next() else {
            return Self { min: 0, max: 1 };
        };
        let (min, max) = iter.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));
        Self { min, max }
    }
}

/// Fraction of the target vocabulary covered by the candidate.
pub fn skill_score(skill_set: &HashSet<String>, target: &TargetSkills) -> f64 {
    target.matches(skill_set) as f64 / target.len().max(1) as f64
}

/// Linear ramp on years, capped at 10.
pub fn experience_score(experience_years: f64) -> f64 {
    (experience_years / 10.0).clamp(0.0, 1.0)
}

/// Categorical lookup on the lower-cased highest-level label. No label at all
/// scores 0.0; a label that matches no category scores the 0.4 floor.
pub fn education_score(education_level: Option<&str>) -> f64 {
    let Some(label) = education_level else {
        return 0.0;
    };
    let label = label.to_lowercase();
    if label.contains("phd") || label.contains("ph.d") {
        1.0
    } else if label.contains("master") || label.contains("m.s") || label.contains("msc") {
        0.8
    } else if ["bachelor", "b.sc", "b.s", "b.tech", "b.e", "b.a"]
        .iter()
        .any(|needle| label.contains(needle))
    {
        0.6
    } else {
        0.4
    }
}

/// Categorical lookup on the joined availability text. Empty availability is
/// the neutral 0.5, distinct from the 0.6 "present but unrecognized" case.
pub fn availability_score(availability: &[String]) -> f64 {
    if availability.is_empty() {
        return 0.5;
    }
    let joined = availability.join(",").to_lowercase();
    if joined.contains("immediate") || joined.contains("now") {
        1.0
    } else if joined.contains("2 weeks") || joined.contains("two weeks") {
        0.8
    } else if joined.contains("month") {
        0.5
    } else {
        0.6
    }
}

/// Lower salary relative to the population scores higher. Absent salary and a
/// degenerate population (max == min) are both neutral.
pub fn salary_score(salary: Option<i64>, bounds: SalaryBounds) -> f64 {
    let Some(salary) = salary else {
        return 0.5;
    };
    if bounds.max == bounds.min {
        return 0.5;
    }
    let normalized = (bounds.max - salary) as f64 / (bounds.max - bounds.min) as f64;
    normalized.clamp(0.0, 1.0)
}

/// Combined 0–100 score, rounded to two decimals. Pure: identical inputs
/// always reproduce the identical value.
pub fn compute_score(
    features: &CandidateFeatures,
    target: &TargetSkills,
    weights: &ScoringWeights,
    bounds: SalaryBounds,
) -> f64 {
    let combined = weights.skill * skill_score(&features.skill_set, target)
        + weights.experience * experience_score(features.experience_years)
        + weights.education * education_score(features.education_level.as_deref())
        + weights.availability * availability_score(&features.availability)
        + weights.salary * salary_score(features.salary_expectation, bounds);
    round2(combined * 100.0)
}

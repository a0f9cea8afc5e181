//! Feature extraction — aggregates normalized fields into a per-candidate
//! feature set consumed by the scorer, the selector, and the reason generator.

use std::collections::HashSet;

use serde_json::Value;

use crate::models::candidate::RawSubmission;
use crate::screening::normalize::{coerce_token_list, extract_experience_years, parse_salary};

/// Normalized view of one candidate. Derived deterministically from a raw
/// submission; `experience_years` is always non-negative.
#[derive(Debug, Clone, Default)]
pub struct CandidateFeatures {
    /// Skill tokens in display form, original casing preserved.
    pub skills: Vec<String>,
    /// Lower-cased skill tokens for matching and overlap computation.
    pub skill_set: HashSet<String>,
    pub experience_years: f64,
    /// Highest education level label, if one could be derived.
    pub education_level: Option<String>,
    pub availability: Vec<String>,
    /// Expected annual salary in whole USD.
    pub salary_expectation: Option<i64>,
}

/// Extracts features from a freshly uploaded submission.
pub fn extract_features(submission: &RawSubmission) -> CandidateFeatures {
    let skills = coerce_token_list(submission.skills.as_ref());
    let work_experiences = submission
        .work_experiences
        .as_ref()
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    CandidateFeatures {
        skill_set: lowercase_set(&skills),
        skills,
        experience_years: extract_experience_years(work_experiences),
        education_level: education_label(submission.education.as_ref()),
        availability: coerce_token_list(submission.work_availability.as_ref()),
        salary_expectation: submission.salary_value().and_then(parse_salary),
    }
}

/// Rebuilds features from the normalized fields persisted on a candidate row.
/// Used when rescoring or selecting over a stored snapshot, where experience
/// years and salary were already normalized at ingest time.
pub fn stored_features(
    skills: &Value,
    experience_years: f64,
    education: &Value,
    availability: &Value,
    salary_expectation: Option<i64>,
) -> CandidateFeatures {
    let skills = coerce_token_list(Some(skills));
    CandidateFeatures {
        skill_set: lowercase_set(&skills),
        skills,
        experience_years,
        education_level: education_label(Some(education)),
        availability: coerce_token_list(Some(availability)),
        salary_expectation,
    }
}

fn lowercase_set(skills: &[String]) -> HashSet<String> {
    skills.iter().map(|s| s.trim().to_lowercase()).collect()
}

/// Derives the highest-level education label. Accepts either an object with a
/// `highest_level` field or a bare string; empty values yield no label, which
/// the scorer treats differently from an unrecognized one.
fn education_label(education: Option<&Value>) -> Option<String> {
    match education {
        Some(Value::Object(obj)) => {
            if obj.is_empty() {
                return None;
            }
            Some(
                obj.get("highest_level")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .trim()
                    .to_string(),
            )
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

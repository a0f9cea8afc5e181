use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::screening::features::{stored_features, CandidateFeatures};
use crate::screening::selector::ScoredCandidate;

/// A candidate as persisted. The loosely-structured submission fields are
/// kept verbatim as JSONB next to the normalized columns so features can be
/// rebuilt from a stored snapshot without re-reading the upload.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub availability: Value,
    pub salary_expectation: Option<i64>,
    pub work_experiences: Value,
    pub education: Value,
    pub skills: Value,
    pub experience_years: f64,
    pub score: f64,
    pub selected: bool,
    pub reason: Option<String>,
}

impl CandidateRow {
    /// Rebuilds the feature set from the stored normalized fields.
    pub fn features(&self) -> CandidateFeatures {
        stored_features(
            &self.skills,
            self.experience_years,
            &self.education,
            &self.availability,
            self.salary_expectation,
        )
    }

    pub fn to_scored(&self) -> ScoredCandidate {
        ScoredCandidate {
            id: self.id,
            name: self.name.clone(),
            features: self.features(),
            score: self.score,
        }
    }
}

/// One record of an uploaded submissions file. Field shapes are deliberately
/// loose: skills and availability may be a list or a delimited string, the
/// salary is an object keyed by employment type, work history entries are
/// free-form objects. The normalizer owns making sense of all of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub annual_salary_expectation: Option<Value>,
    #[serde(default, alias = "work_experience")]
    pub work_experiences: Option<Value>,
    #[serde(default)]
    pub education: Option<Value>,
    #[serde(default)]
    pub skills: Option<Value>,
    #[serde(default, alias = "availability")]
    pub work_availability: Option<Value>,
}

impl RawSubmission {
    /// The raw salary value to normalize: the `full-time` entry of the salary
    /// object when present (underscore spelling tolerated), else any entry,
    /// else the field itself for submissions that sent a bare number/string.
    pub fn salary_value(&self) -> Option<&Value> {
        let raw = self.annual_salary_expectation.as_ref()?;
        match raw {
            Value::Object(obj) => obj
                .get("full-time")
                .or_else(|| obj.get("full_time"))
                .or_else(|| obj.values().next()),
            other => Some(other),
        }
    }

    /// Submission timestamp, defaulting to now when absent or unparseable.
    pub fn submitted_at_or_now(&self) -> DateTime<Utc> {
        self.submitted_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_accepts_field_aliases() {
        let sub: RawSubmission = serde_json::from_value(json!({
            "name": "Ada",
            "work_experience": [{"roleName": "Engineer"}],
            "availability": ["immediate"]
        }))
        .unwrap();
        assert!(sub.work_experiences.is_some());
        assert!(sub.work_availability.is_some());
    }

    #[test]
    fn salary_value_prefers_full_time_then_any() {
        let sub: RawSubmission = serde_json::from_value(json!({
            "annual_salary_expectation": {"full-time": "$90,000", "part-time": "$40,000"}
        }))
        .unwrap();
        assert_eq!(sub.salary_value(), Some(&json!("$90,000")));

        let underscore: RawSubmission = serde_json::from_value(json!({
            "annual_salary_expectation": {"full_time": "$85,000"}
        }))
        .unwrap();
        assert_eq!(underscore.salary_value(), Some(&json!("$85,000")));

        let bare: RawSubmission = serde_json::from_value(json!({
            "annual_salary_expectation": 77000
        }))
        .unwrap();
        assert_eq!(bare.salary_value(), Some(&json!(77000)));

        assert_eq!(RawSubmission::default().salary_value(), None);
    }

    #[test]
    fn submitted_at_parses_rfc3339_and_tolerates_garbage() {
        let sub: RawSubmission = serde_json::from_value(json!({
            "submitted_at": "2025-01-15T09:30:00Z"
        }))
        .unwrap();
        let parsed = sub.submitted_at_or_now();
        assert_eq!(parsed.to_rfc3339(), "2025-01-15T09:30:00+00:00");

        let garbage: RawSubmission =
            serde_json::from_value(json!({"submitted_at": "yesterday"})).unwrap();
        // falls back to now; just check it does not panic and is recent-ish
        assert!(garbage.submitted_at_or_now() > DateTime::<Utc>::MIN_UTC);
    }
}

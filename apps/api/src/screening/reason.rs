//! Shortlist justification strings, built from the same extracted features
//! the scorer consumes so the explanation can never drift from the score.

use crate::screening::features::CandidateFeatures;

/// Produces a structured, human-readable justification: the main fields in
/// fixed order joined by "; ", then derived fit tags joined by " | ".
pub fn generate_reason(features: &CandidateFeatures) -> String {
    let skills = features.skills.join(", ");
    let education = features.education_level.as_deref().unwrap_or("-");
    let availability = if features.availability.is_empty() {
        "-".to_string()
    } else {
        features.availability.join(", ")
    };
    let salary = features
        .salary_expectation
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());

    let fields = [
        format!("Skills: {skills}"),
        format!("Experience: {} yrs", features.experience_years),
        format!("Education: {education}"),
        format!("Availability: {availability}"),
        format!("Salary expectation: ${salary}"),
    ];

    format!("{} — {}", fields.join("; "), derive_tags(features).join(" | "))
}

/// Substring scan over each skill token. A token can fire several rules, and
/// several tokens can fire the same rule; with no hits the candidate gets the
/// single "Versatile candidate" tag.
fn derive_tags(features: &CandidateFeatures) -> Vec<&'static str> {
    let mut tags = Vec::new();
    for skill in &features.skills {
        let low = skill.to_lowercase();
        if low.contains("llm") || low.contains("prompt") {
            tags.push("LLM / eval fit");
        }
        if low.contains("flask") || low.contains("fastapi") {
            tags.push("Backend strength");
        }
        if low.contains("react") || low.contains("next.js") {
            tags.push("Frontend/product fit");
        }
        if low.contains("payments") {
            tags.push("Fintech/payments experience");
        }
    }
    if tags.is_empty() {
        tags.push("Versatile candidate");
    }
    tags
}

//! Candidate persistence: snapshot reads, seeding, and the batch
//! score/select flows.
//!
//! Batch operations follow one discipline: materialize the full candidate
//! snapshot once, derive salary bounds from it, score and select from it,
//! then write back — never interleave bound derivation with row updates.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::candidate::{CandidateRow, RawSubmission};
use crate::screening::features::extract_features;
use crate::screening::reason::generate_reason;
use crate::screening::scoring::{compute_score, SalaryBounds};
use crate::screening::selector::{select_diverse, ScoredCandidate};
use crate::screening::ScreeningOptions;

pub async fn count_candidates(pool: &PgPool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
        .fetch_one(pool)
        .await?)
}

/// List filters, all optional. `q` is a case-insensitive substring match on
/// the name or the raw skills.
#[derive(Debug, Default, Clone)]
pub struct CandidateFilter {
    pub q: Option<String>,
    pub min_experience: Option<f64>,
    pub max_salary: Option<i64>,
    pub sort_by_score: bool,
}

pub async fn list_candidates(pool: &PgPool, filter: &CandidateFilter) -> Result<Vec<CandidateRow>> {
    let order = if filter.sort_by_score {
        "ORDER BY score DESC, id ASC"
    } else {
        "ORDER BY id ASC"
    };
    let sql = format!(
        r#"
        SELECT * FROM candidates
        WHERE ($1::text IS NULL OR lower(name) LIKE $1 OR lower(skills::text) LIKE $1)
          AND ($2::float8 IS NULL OR experience_years >= $2)
          AND ($3::int8 IS NULL OR salary_expectation <= $3)
        {order}
        "#
    );
    let like = filter.q.as_ref().map(|q| format!("%{}%", q.to_lowercase()));
    Ok(sqlx::query_as::<_, CandidateRow>(&sql)
        .bind(like)
        .bind(filter.min_experience)
        .bind(filter.max_salary)
        .fetch_all(pool)
        .await?)
}

pub async fn fetch_candidate(pool: &PgPool, id: i64) -> Result<Option<CandidateRow>> {
    Ok(
        sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn selected_candidates(pool: &PgPool) -> Result<Vec<CandidateRow>> {
    Ok(sqlx::query_as::<_, CandidateRow>(
        "SELECT * FROM candidates WHERE selected ORDER BY score DESC, id ASC",
    )
    .fetch_all(pool)
    .await?)
}

/// Wipes the table and inserts the given submissions, scored against bounds
/// computed over this upload. Runs in one transaction; readers never observe
/// a half-replaced population.
pub async fn replace_with_submissions(
    pool: &PgPool,
    submissions: &[RawSubmission],
    options: &ScreeningOptions,
) -> Result<usize> {
    let features: Vec<_> = submissions.iter().map(extract_features).collect();
    let bounds = SalaryBounds::from_population(features.iter().map(|f| f.salary_expectation));

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM candidates").execute(&mut *tx).await?;

    for (submission, feats) in submissions.iter().zip(&features) {
        let score = compute_score(feats, &options.target_skills, &options.weights, bounds);
        sqlx::query(
            r#"
            INSERT INTO candidates
                (name, email, phone, location, submitted_at, availability,
                 salary_expectation, work_experiences, education, skills,
                 experience_years, score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(submission.name.clone().unwrap_or_default())
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.location)
        .bind(submission.submitted_at_or_now())
        .bind(serde_json::json!(feats.availability))
        .bind(feats.salary_expectation)
        .bind(
            submission
                .work_experiences
                .clone()
                .unwrap_or_else(|| serde_json::json!([])),
        )
        .bind(submission.education.clone().unwrap_or(serde_json::Value::Null))
        .bind(serde_json::json!(feats.skills))
        .bind(feats.experience_years)
        .bind(score)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(count = submissions.len(), "candidate population replaced");
    Ok(submissions.len())
}

/// Seeds the store from the submissions file, if it exists. Returns the
/// number of candidates inserted, or 0 when the file is missing.
pub async fn seed_from_file(
    pool: &PgPool,
    path: &Path,
    options: &ScreeningOptions,
) -> Result<usize> {
    if !path.exists() {
        info!(path = %path.display(), "no submissions file, skipping seed");
        return Ok(0);
    }
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading submissions file {}", path.display()))?;
    let submissions: Vec<RawSubmission> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing submissions file {}", path.display()))?;
    replace_with_submissions(pool, &submissions, options).await
}

/// Marks one candidate selected with a freshly generated reason. Returns the
/// updated row, or `None` if the id does not exist.
pub async fn mark_selected(pool: &PgPool, id: i64) -> Result<Option<CandidateRow>> {
    let Some(mut row) = fetch_candidate(pool, id).await? else {
        return Ok(None);
    };
    let reason = generate_reason(&row.features());
    sqlx::query("UPDATE candidates SET selected = TRUE, reason = $1 WHERE id = $2")
        .bind(&reason)
        .bind(id)
        .execute(pool)
        .await?;
    row.selected = true;
    row.reason = Some(reason);
    Ok(Some(row))
}

/// One shortlist entry as reported to callers: identity, score, and the
/// generated justification, in acceptance order.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionEntry {
    pub id: i64,
    pub name: String,
    pub score: f64,
    pub reason: String,
}

/// Scores the whole population from one snapshot and replaces the current
/// selection with a diverse top-k. The previous selection is cleared in the
/// same transaction; the new shortlist fully supersedes it.
pub async fn run_auto_select(
    pool: &PgPool,
    options: &ScreeningOptions,
) -> Result<Vec<SelectionEntry>> {
    let run_id = Uuid::new_v4();

    let rows = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates ORDER BY id ASC")
        .fetch_all(pool)
        .await?;

    let bounds =
        SalaryBounds::from_population(rows.iter().map(|row| row.salary_expectation));
    let scored: Vec<ScoredCandidate> = rows
        .iter()
        .map(|row| {
            let features = row.features();
            let score = compute_score(&features, &options.target_skills, &options.weights, bounds);
            ScoredCandidate {
                id: row.id,
                name: row.name.clone(),
                features,
                score,
            }
        })
        .collect();

    let chosen = select_diverse(&scored, options.select_count, options.policy);

    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE candidates SET selected = FALSE, reason = NULL")
        .execute(&mut *tx)
        .await?;

    let mut entries = Vec::with_capacity(chosen.len());
    for candidate in &chosen {
        let reason = generate_reason(&candidate.features);
        sqlx::query("UPDATE candidates SET selected = TRUE, reason = $1, score = $2 WHERE id = $3")
            .bind(&reason)
            .bind(candidate.score)
            .bind(candidate.id)
            .execute(&mut *tx)
            .await?;
        entries.push(SelectionEntry {
            id: candidate.id,
            name: candidate.name.clone(),
            score: candidate.score,
            reason,
        });
    }
    tx.commit().await?;

    info!(
        %run_id,
        population = rows.len(),
        chosen = entries.len(),
        "auto-select complete"
    );
    Ok(entries)
}

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::candidates::store::{self, CandidateFilter, SelectionEntry};
use crate::errors::AppError;
use crate::models::candidate::{CandidateRow, RawSubmission};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub min_experience: Option<f64>,
    pub max_salary: Option<i64>,
    pub sort_by: Option<String>,
}

#[derive(Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateRow>,
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let filter = CandidateFilter {
        q: params.q,
        min_experience: params.min_experience,
        max_salary: params.max_salary,
        sort_by_score: params.sort_by.as_deref().unwrap_or("score") == "score",
    };
    let candidates = store::list_candidates(&state.db, &filter).await?;
    Ok(Json(CandidateListResponse { candidates }))
}

/// POST /api/v1/candidates/upload
///
/// Multipart upload of a submissions JSON file. Replaces the entire candidate
/// population: the file is persisted to the configured data path, then the
/// store is re-seeded and re-scored from it.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut payload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if let Some(filename) = field.file_name() {
            if !filename.ends_with(".json") {
                return Err(AppError::Validation(
                    "only .json uploads are accepted".to_string(),
                ));
            }
        }
        let bytes: bytes::Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        payload = Some(bytes);
        break;
    }
    let bytes = payload
        .ok_or_else(|| AppError::Validation("missing multipart field 'file'".to_string()))?;

    let submissions = parse_submissions(&bytes)?;

    // Persist the upload; startup re-seeds from this path.
    if let Some(parent) = state.config.data_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(anyhow::Error::from)?;
    }
    tokio::fs::write(&state.config.data_path, &bytes)
        .await
        .map_err(anyhow::Error::from)?;

    let count = store::replace_with_submissions(&state.db, &submissions, &state.options).await?;
    Ok(Json(json!({"status": "ok", "count": count})))
}

/// Parses the uploaded document. The document must be a JSON array of
/// submission objects; anything else is a caller contract violation. Field
/// content inside each object is free-form — the normalizer absorbs it.
fn parse_submissions(bytes: &[u8]) -> Result<Vec<RawSubmission>, AppError> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::Validation(format!("upload is not valid JSON: {e}")))?;
    let Value::Array(items) = document else {
        return Err(AppError::Validation(
            "upload must be a JSON array of submissions".to_string(),
        ));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).map_err(|e| {
                AppError::UnprocessableEntity(format!("submission {i} is malformed: {e}"))
            })
        })
        .collect()
}

/// POST /api/v1/candidates/:id/select
pub async fn handle_select_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let row = store::mark_selected(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("candidate {id} not found")))?;
    Ok(Json(json!({"status": "ok", "id": row.id})))
}

#[derive(Serialize)]
pub struct AutoSelectResponse {
    pub status: &'static str,
    pub selected: Vec<SelectionEntry>,
}

/// POST /api/v1/candidates/auto-select
///
/// Batch flow over one snapshot: bounds → scores → diverse top-k → persist.
/// The new shortlist fully replaces the previous one.
pub async fn handle_auto_select(
    State(state): State<AppState>,
) -> Result<Json<AutoSelectResponse>, AppError> {
    let selected = store::run_auto_select(&state.db, &state.options).await?;
    Ok(Json(AutoSelectResponse {
        status: "ok",
        selected,
    }))
}

#[derive(Serialize)]
pub struct SelectedCandidate {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub skills: Value,
    pub score: f64,
    pub reason: Option<String>,
}

#[derive(Serialize)]
pub struct SelectedResponse {
    pub selected: Vec<SelectedCandidate>,
}

/// GET /api/v1/candidates/selected
pub async fn handle_selected(
    State(state): State<AppState>,
) -> Result<Json<SelectedResponse>, AppError> {
    let rows = store::selected_candidates(&state.db).await?;
    let selected = rows
        .into_iter()
        .map(|row| SelectedCandidate {
            id: row.id,
            name: row.name,
            location: row.location,
            skills: row.skills,
            score: row.score,
            reason: row.reason,
        })
        .collect();
    Ok(Json(SelectedResponse { selected }))
}

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use shared::models::TranscriptEnvelope;
use shared::ApiError;
use tracing::info;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TranscriptParams {
    pub recording_id: Option<String>,
}

/// Proxy the ordered transcript for one recording.
pub async fn get_transcript(
    State(state): State<AppState>,
    Query(params): Query<TranscriptParams>,
) -> Result<Json<TranscriptEnvelope>, ApiError> {
    let recording_id = params
        .recording_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("recording_id is required".to_string()))?;

    info!(%recording_id, "fetching transcript");

    let transcript = state
        .fathom
        .get_transcript(&recording_id)
        .await
        .inspect_err(|e| tracing::warn!(kind = e.kind(), %recording_id, "transcript request failed"))?;

    Ok(Json(TranscriptEnvelope { transcript }))
}

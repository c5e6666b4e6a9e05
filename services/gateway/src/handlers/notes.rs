use axum::extract::State;
use axum::Json;
use chrono::Utc;
use shared::models::{GenerateNotesRequest, NotesEnvelope};
use shared::ApiError;
use tracing::info;

use crate::config::MAX_TRANSCRIPT_CHARS;
use crate::notemaker::WebhookPayload;
use crate::AppState;

/// Validate the transcript, default the metadata, and forward the request to
/// the automation webhook. Rejections happen before any upstream call.
pub async fn generate_notes(
    State(state): State<AppState>,
    Json(request): Json<GenerateNotesRequest>,
) -> Result<Json<NotesEnvelope>, ApiError> {
    let transcript = request.transcript.trim();
    if transcript.is_empty() {
        return Err(ApiError::BadRequest("Transcript is required".to_string()));
    }

    let length = transcript.chars().count();
    if length > MAX_TRANSCRIPT_CHARS {
        return Err(ApiError::BadRequest(
            "Transcript too long (max 200k chars)".to_string(),
        ));
    }

    let payload = WebhookPayload {
        transcript: transcript.to_string(),
        meeting_title: request
            .meeting_title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| "Untitled Meeting".to_string()),
        meeting_date: request
            .meeting_date
            .filter(|date| !date.is_empty())
            .unwrap_or_else(|| Utc::now().to_rfc3339()),
    };

    info!(
        meeting_title = %payload.meeting_title,
        transcript_chars = length,
        "generating notes"
    );

    let envelope = state
        .notemaker
        .generate(&payload)
        .await
        .inspect_err(|e| tracing::warn!(kind = e.kind(), "notes generation failed"))?;

    Ok(Json(envelope))
}

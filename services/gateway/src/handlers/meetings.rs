use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use shared::models::MeetingsPage;
use shared::ApiError;
use tracing::info;

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListMeetingsParams {
    pub cursor: Option<String>,
}

/// Proxy one page of the meeting list, passing the opaque cursor through.
pub async fn list_meetings(
    State(state): State<AppState>,
    Query(params): Query<ListMeetingsParams>,
) -> Result<Json<MeetingsPage>, ApiError> {
    let cursor = params.cursor.as_deref().filter(|c| !c.is_empty());
    info!(cursor = cursor.unwrap_or(""), "listing meetings");

    let page = state
        .fathom
        .list_meetings(cursor)
        .await
        .inspect_err(|e| tracing::warn!(kind = e.kind(), "meetings request failed"))?;

    Ok(Json(page))
}

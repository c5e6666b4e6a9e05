use std::time::{Duration, Instant};

use dashmap::DashMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::models::{Meeting, MeetingsPage, TranscriptLine};
use shared::ApiError;
use tracing::{debug, error, warn};

use crate::config::{FathomConfig, MEETINGS_CACHE_TTL, MEETINGS_PAGE_SIZE};

/// Client for the recording service's external API. Holds the per-cursor
/// response cache for the meeting list.
pub struct FathomClient {
    client: Client,
    config: FathomConfig,
    list_cache: DashMap<String, CachedPage>,
}

struct CachedPage {
    fetched_at: Instant,
    page: MeetingsPage,
}

/// Wire shape of the upstream list endpoint.
#[derive(Debug, Deserialize)]
struct ListMeetingsResponse {
    #[serde(default)]
    items: Vec<Meeting>,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// The transcript endpoint has been observed returning both an enveloped and
/// a bare array body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranscriptResponse {
    Enveloped { transcript: Vec<TranscriptLine> },
    Bare(Vec<TranscriptLine>),
}

impl TranscriptResponse {
    fn into_lines(self) -> Vec<TranscriptLine> {
        match self {
            TranscriptResponse::Enveloped { transcript } => transcript,
            TranscriptResponse::Bare(lines) => lines,
        }
    }
}

impl FathomClient {
    pub fn new(config: FathomConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            list_cache: DashMap::new(),
        }
    }

    fn api_key(&self) -> Result<&str, ApiError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(ApiError::Config("FATHOM_API_KEY"))
    }

    /// Fetch one page of meetings, passing the opaque cursor back upstream
    /// unmodified. Successful pages are cached per cursor for a short TTL.
    pub async fn list_meetings(&self, cursor: Option<&str>) -> Result<MeetingsPage, ApiError> {
        let api_key = self.api_key()?;

        let cache_key = cursor.unwrap_or_default().to_string();
        if let Some(hit) = self.list_cache.get(&cache_key) {
            if hit.fetched_at.elapsed() < MEETINGS_CACHE_TTL {
                debug!(cursor = %cache_key, "serving meetings page from cache");
                return Ok(hit.page.clone());
            }
        }

        let mut request = self
            .client
            .get(format!("{}/meetings", self.config.base_url))
            .header("X-Api-Key", api_key)
            .query(&[("limit", MEETINGS_PAGE_SIZE)]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "failed to reach recording service");
            ApiError::Internal("Internal server error".to_string())
        })?;

        let status = response.status();
        debug!(%status, cursor = %cache_key, "recording service answered meetings request");

        if status == StatusCode::UNAUTHORIZED {
            warn!("recording service rejected the API key");
            return Err(ApiError::Unauthorized("Invalid Fathom API key".to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "recording service meetings request failed");
            return Err(ApiError::Upstream(
                "Failed to fetch meetings from Fathom".to_string(),
            ));
        }

        let upstream: ListMeetingsResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse meetings response");
            ApiError::Internal("Internal server error".to_string())
        })?;

        let page = MeetingsPage {
            total: upstream.items.len(),
            meetings: upstream.items,
            next_cursor: upstream.next_cursor,
        };

        self.list_cache.insert(
            cache_key,
            CachedPage {
                fetched_at: Instant::now(),
                page: page.clone(),
            },
        );

        Ok(page)
    }

    /// Fetch the ordered transcript for one recording. A 404 means the
    /// recording may still be processing, so it maps to a retryable
    /// not-yet-available result rather than a permanent absence.
    pub async fn get_transcript(
        &self,
        recording_id: &str,
    ) -> Result<Vec<TranscriptLine>, ApiError> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(format!(
                "{}/recordings/{}/transcript",
                self.config.base_url, recording_id
            ))
            .header("X-Api-Key", api_key)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, recording_id, "failed to reach recording service");
                ApiError::Internal("Internal server error".to_string())
            })?;

        let status = response.status();
        debug!(%status, recording_id, "recording service answered transcript request");

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotYetAvailable(
                "Transcript not found - meeting may still be processing".to_string(),
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, recording_id, "recording service transcript request failed");
            return Err(ApiError::Upstream("Failed to fetch transcript".to_string()));
        }

        let upstream: TranscriptResponse = response.json().await.map_err(|e| {
            error!(error = %e, recording_id, "failed to parse transcript response");
            ApiError::Internal("Internal server error".to_string())
        })?;

        Ok(upstream.into_lines())
    }
}

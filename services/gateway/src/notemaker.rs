use reqwest::Client;
use serde::Serialize;
use shared::models::NotesEnvelope;
use shared::ApiError;
use tracing::{debug, error, warn};

use crate::config::NotemakerConfig;

/// Payload forwarded to the automation webhook. Metadata is already
/// defaulted by the handler; the transcript is trimmed.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub transcript: String,
    pub meeting_title: String,
    pub meeting_date: String,
}

/// Client for the notes automation webhook. The webhook runs a hosted LLM
/// workflow, so every call carries the long-form processing timeout.
pub struct NotemakerClient {
    client: Client,
    config: NotemakerConfig,
}

impl NotemakerClient {
    pub fn new(config: NotemakerConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub async fn generate(&self, payload: &WebhookPayload) -> Result<NotesEnvelope, ApiError> {
        debug!(
            meeting_title = %payload.meeting_title,
            transcript_chars = payload.transcript.chars().count(),
            "forwarding transcript to notes webhook"
        );

        let response = self
            .client
            .post(&self.config.webhook_url)
            .timeout(self.config.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!(timeout_secs = self.config.timeout.as_secs(), "notes webhook timed out");
                    ApiError::Timeout(
                        "AI processing timed out - transcript may be too long".to_string(),
                    )
                } else {
                    error!(error = %e, "failed to reach notes webhook");
                    ApiError::Internal("Internal server error".to_string())
                }
            })?;

        let status = response.status();
        debug!(%status, "notes webhook answered");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "notes webhook failed to process transcript");
            return Err(ApiError::Upstream(
                "AI agent failed to process transcript".to_string(),
            ));
        }

        // A response without a structurally valid notes payload is an
        // upstream failure, never passed through silently.
        response.json::<NotesEnvelope>().await.map_err(|e| {
            error!(error = %e, "notes webhook returned an invalid payload");
            ApiError::Upstream("Invalid response from notes webhook".to_string())
        })
    }
}

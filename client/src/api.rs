use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::models::{
    GenerateNotesRequest, GeneratedNotes, MeetingsPage, NotesEnvelope, TranscriptEnvelope,
    TranscriptLine,
};
use shared::ErrorBody;
use tracing::debug;

use crate::error::ClientError;

/// Typed accessors over the gateway's three proxy routes.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn list_meetings(&self, cursor: Option<&str>) -> Result<MeetingsPage, ClientError> {
        let mut request = self.http.get(format!("{}/api/meetings", self.base_url));
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        debug!(cursor = cursor.unwrap_or(""), "fetching meetings page");
        decode(request.send().await?).await
    }

    pub async fn transcript(
        &self,
        recording_id: &str,
    ) -> Result<Vec<TranscriptLine>, ClientError> {
        debug!(recording_id, "fetching transcript");
        let response = self
            .http
            .get(format!("{}/api/transcript", self.base_url))
            .query(&[("recording_id", recording_id)])
            .send()
            .await?;

        let envelope: TranscriptEnvelope = decode(response).await?;
        Ok(envelope.transcript)
    }

    pub async fn generate_notes(
        &self,
        request: &GenerateNotesRequest,
    ) -> Result<GeneratedNotes, ClientError> {
        debug!(
            transcript_chars = request.transcript.chars().count(),
            "requesting notes generation"
        );
        let response = self
            .http
            .post(format!("{}/api/notes", self.base_url))
            .json(request)
            .send()
            .await?;

        let envelope: NotesEnvelope = decode(response).await?;
        Ok(envelope.notes)
    }
}

/// Decode a gateway response, turning the `{error}` envelope of non-success
/// statuses into a typed error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "Something went wrong".to_string());
        return Err(ClientError::Api { status, message });
    }

    Ok(response.json().await?)
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A meeting as reported by the recording service's list endpoint.
///
/// `id` is the listing identity; `recording_id` is the key that correlates a
/// meeting with its transcript. The two live in different value spaces and
/// are not interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub recording_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub recording_start_time: Option<OffsetDateTime>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub recording_end_time: Option<OffsetDateTime>,
    /// Upstream classification, "internal" or "external". Forwarded verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_invitees_domains_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_invitees: Option<Vec<Invitee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<TranscriptLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_summary: Option<MeetingSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<ActionItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_by: Option<RecordedBy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitee {
    pub name: String,
    pub email: String,
    pub is_external: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedBy {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// One utterance of a transcript. Lines arrive in chronological order and
/// that order is preserved end-to-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub timestamp: String,
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_calendar_invitee_email: Option<String>,
}

/// Summary generated upstream by the recording service itself, distinct from
/// the notes produced by the automation webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingSummary {
    pub template_name: String,
    pub markdown_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub description: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<ActionItemAssignee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItemAssignee {
    pub name: String,
    pub email: String,
}

/// Structured notes returned by the automation webhook. Produced whole; a
/// regeneration fully replaces the prior value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNotes {
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub follow_ups: Vec<String>,
    #[serde(default)]
    pub meeting_title: String,
    #[serde(default)]
    pub meeting_date: String,
}

/// One page of the meeting list. `next_cursor` is an opaque upstream token;
/// `None` means end of list and serializes as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingsPage {
    pub meetings: Vec<Meeting>,
    pub next_cursor: Option<String>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEnvelope {
    pub transcript: Vec<TranscriptLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesEnvelope {
    pub notes: GeneratedNotes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateNotesRequest {
    /// Defaulted on deserialization so an absent field is rejected as an
    /// empty transcript rather than as a malformed body.
    #[serde(default)]
    pub transcript: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<String>,
}

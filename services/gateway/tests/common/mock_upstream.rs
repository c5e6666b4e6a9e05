use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value as JsonValue};
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

#[derive(Debug, Clone)]
pub struct RecordedListCall {
    pub cursor: Option<String>,
    pub limit: Option<String>,
}

#[derive(Clone)]
struct FathomState {
    list_calls: Arc<Mutex<Vec<RecordedListCall>>>,
    transcript_calls: Arc<Mutex<Vec<String>>>,
    pages: Arc<Mutex<HashMap<String, JsonValue>>>,
    list_failure: Arc<Mutex<Option<(StatusCode, JsonValue)>>>,
    transcript_response: Arc<Mutex<(StatusCode, JsonValue)>>,
}

/// Programmable stand-in for the recording service API.
pub struct MockFathom {
    pub base_url: String,
    list_calls: Arc<Mutex<Vec<RecordedListCall>>>,
    transcript_calls: Arc<Mutex<Vec<String>>>,
    pages: Arc<Mutex<HashMap<String, JsonValue>>>,
    list_failure: Arc<Mutex<Option<(StatusCode, JsonValue)>>>,
    transcript_response: Arc<Mutex<(StatusCode, JsonValue)>>,
    _server_handle: tokio::task::JoinHandle<()>,
}

impl MockFathom {
    pub async fn start() -> anyhow::Result<Self> {
        let list_calls: Arc<Mutex<Vec<RecordedListCall>>> = Arc::new(Mutex::new(Vec::new()));
        let transcript_calls: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let pages: Arc<Mutex<HashMap<String, JsonValue>>> = Arc::new(Mutex::new(HashMap::new()));
        let list_failure = Arc::new(Mutex::new(None));
        let transcript_response = Arc::new(Mutex::new((
            StatusCode::OK,
            json!({ "transcript": [] }),
        )));

        let state = FathomState {
            list_calls: list_calls.clone(),
            transcript_calls: transcript_calls.clone(),
            pages: pages.clone(),
            list_failure: list_failure.clone(),
            transcript_response: transcript_response.clone(),
        };

        let app = Router::new()
            .route("/meetings", get(handle_list_meetings))
            .route(
                "/recordings/:recording_id/transcript",
                get(handle_transcript),
            )
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        sleep(Duration::from_millis(50)).await;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            list_calls,
            transcript_calls,
            pages,
            list_failure,
            transcript_response,
            _server_handle: server_handle,
        })
    }

    /// Register the page served for a cursor (`None` for the first page).
    pub fn set_page(&self, cursor: Option<&str>, body: JsonValue) {
        self.pages
            .lock()
            .unwrap()
            .insert(cursor.unwrap_or_default().to_string(), body);
    }

    pub fn set_list_failure(&self, status: StatusCode, body: JsonValue) {
        *self.list_failure.lock().unwrap() = Some((status, body));
    }

    pub fn clear_list_failure(&self) {
        *self.list_failure.lock().unwrap() = None;
    }

    pub fn set_transcript_response(&self, status: StatusCode, body: JsonValue) {
        *self.transcript_response.lock().unwrap() = (status, body);
    }

    pub fn list_calls(&self) -> Vec<RecordedListCall> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn transcript_calls(&self) -> Vec<String> {
        self.transcript_calls.lock().unwrap().clone()
    }
}

async fn handle_list_meetings(
    State(state): State<FathomState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<JsonValue>) {
    state.list_calls.lock().unwrap().push(RecordedListCall {
        cursor: params.get("cursor").cloned(),
        limit: params.get("limit").cloned(),
    });

    if let Some((status, body)) = state.list_failure.lock().unwrap().clone() {
        return (status, Json(body));
    }

    let cursor = params.get("cursor").cloned().unwrap_or_default();
    let body = state
        .pages
        .lock()
        .unwrap()
        .get(&cursor)
        .cloned()
        .unwrap_or_else(|| json!({ "items": [], "next_cursor": null }));

    (StatusCode::OK, Json(body))
}

async fn handle_transcript(
    State(state): State<FathomState>,
    Path(recording_id): Path<String>,
) -> (StatusCode, Json<JsonValue>) {
    state.transcript_calls.lock().unwrap().push(recording_id);

    let (status, body) = state.transcript_response.lock().unwrap().clone();
    (status, Json(body))
}

#[derive(Clone)]
struct NotemakerState {
    calls: Arc<Mutex<Vec<JsonValue>>>,
    response: Arc<Mutex<Option<(StatusCode, JsonValue)>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

/// Programmable stand-in for the notes automation webhook. By default it
/// echoes the forwarded metadata back inside a valid notes payload.
pub struct MockNotemaker {
    pub base_url: String,
    calls: Arc<Mutex<Vec<JsonValue>>>,
    response: Arc<Mutex<Option<(StatusCode, JsonValue)>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    _server_handle: tokio::task::JoinHandle<()>,
}

impl MockNotemaker {
    pub async fn start() -> anyhow::Result<Self> {
        let calls: Arc<Mutex<Vec<JsonValue>>> = Arc::new(Mutex::new(Vec::new()));
        let response = Arc::new(Mutex::new(None));
        let delay = Arc::new(Mutex::new(None));

        let state = NotemakerState {
            calls: calls.clone(),
            response: response.clone(),
            delay: delay.clone(),
        };

        let app = Router::new()
            .route("/", post(handle_generate))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        sleep(Duration::from_millis(50)).await;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            calls,
            response,
            delay,
            _server_handle: server_handle,
        })
    }

    pub fn set_response(&self, status: StatusCode, body: JsonValue) {
        *self.response.lock().unwrap() = Some((status, body));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<JsonValue> {
        self.calls.lock().unwrap().clone()
    }
}

async fn handle_generate(
    State(state): State<NotemakerState>,
    Json(body): Json<JsonValue>,
) -> (StatusCode, Json<JsonValue>) {
    state.calls.lock().unwrap().push(body.clone());

    let delay = *state.delay.lock().unwrap();
    if let Some(delay) = delay {
        sleep(delay).await;
    }

    if let Some((status, canned)) = state.response.lock().unwrap().clone() {
        return (status, Json(canned));
    }

    let echoed = json!({
        "notes": {
            "summary": "Discussed roadmap and next steps.",
            "key_points": ["Roadmap reviewed"],
            "action_items": ["Send follow-up email"],
            "decisions": ["Ship in Q3"],
            "follow_ups": ["Schedule design review"],
            "meeting_title": body["meeting_title"],
            "meeting_date": body["meeting_date"],
        }
    });
    (StatusCode::OK, Json(echoed))
}

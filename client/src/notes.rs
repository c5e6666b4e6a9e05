use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use shared::models::{GenerateNotesRequest, GeneratedNotes};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::api::ApiClient;

/// Generation state for one meeting view: `Idle → Processing → Done | Error`,
/// with `Done → Processing` on regenerate. There is no cancellation state; a
/// new request supersedes tracking of the prior one.
#[derive(Debug, Clone, PartialEq)]
pub enum NotesState {
    Idle,
    Processing,
    Done(GeneratedNotes),
    Error(String),
}

/// Tracks one meeting's notes generation against the gateway.
///
/// Starting a new generation aborts the outstanding gateway call so an
/// abandoned view does not leak upstream work; a superseded call that was
/// already completing races harmlessly and its result is discarded.
pub struct NotesSession {
    api: ApiClient,
    state: watch::Sender<NotesState>,
    seq: Arc<AtomicU64>,
    current: Option<AbortHandle>,
}

impl NotesSession {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(NotesState::Idle);
        Self {
            api,
            state,
            seq: Arc::new(AtomicU64::new(0)),
            current: None,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> NotesState {
        self.state.borrow().clone()
    }

    /// Observe state transitions, e.g. to drive a view.
    pub fn subscribe(&self) -> watch::Receiver<NotesState> {
        self.state.subscribe()
    }

    pub fn is_processing(&self) -> bool {
        matches!(&*self.state.borrow(), NotesState::Processing)
    }

    /// Start (or restart) a generation. Any in-flight request is aborted and
    /// its late result, should the abort lose the race, is discarded.
    pub fn generate(&mut self, request: GenerateNotesRequest) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }

        // Bump the sequence before publishing Processing so a stale task can
        // never overwrite the newer state.
        let id = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(NotesState::Processing);

        let api = self.api.clone();
        let state = self.state.clone();
        let seq = Arc::clone(&self.seq);

        let task = tokio::spawn(async move {
            let result = api.generate_notes(&request).await;

            state.send_if_modified(|current| {
                if seq.load(Ordering::SeqCst) != id {
                    debug!(generation = id, "discarding superseded notes result");
                    return false;
                }
                *current = match result {
                    Ok(notes) => NotesState::Done(notes),
                    Err(e) => NotesState::Error(e.to_string()),
                };
                true
            });
        });

        self.current = Some(task.abort_handle());
    }
}

impl Drop for NotesSession {
    fn drop(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }
}

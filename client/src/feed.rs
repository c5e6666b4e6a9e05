use std::sync::Arc;

use shared::models::{Meeting, MeetingsPage};

use crate::error::ClientError;
use crate::store::MeetingStore;

/// Cursor-following accumulation over the meeting list.
///
/// Pages are appended in arrival order and never reordered or de-duplicated
/// beyond what the upstream ordering contract already guarantees.
pub struct MeetingFeed {
    store: Arc<MeetingStore>,
    pages: Vec<MeetingsPage>,
}

impl MeetingFeed {
    pub fn new(store: Arc<MeetingStore>) -> Self {
        Self {
            store,
            pages: Vec::new(),
        }
    }

    /// Load the next page, following the last page's cursor. Returns `false`
    /// when the list is exhausted (no cursor left to follow).
    pub async fn load_more(&mut self) -> Result<bool, ClientError> {
        let cursor = match self.pages.last() {
            Some(page) => match &page.next_cursor {
                Some(cursor) => Some(cursor.clone()),
                None => return Ok(false),
            },
            None => None,
        };

        let page = self.store.list_page(cursor.as_deref()).await?;
        self.pages.push(page);
        Ok(true)
    }

    /// All loaded meetings, flattened in arrival order.
    pub fn meetings(&self) -> impl Iterator<Item = &Meeting> {
        self.pages.iter().flat_map(|page| page.meetings.iter())
    }

    pub fn loaded(&self) -> usize {
        self.pages.iter().map(|page| page.meetings.len()).sum()
    }

    /// Whether another page may exist. `true` before the first load.
    pub fn has_more(&self) -> bool {
        self.pages
            .last()
            .map_or(true, |page| page.next_cursor.is_some())
    }
}

//! Search session state: query lifecycle, the result set, pagination.

use cinevision_model::{MediaKey, SearchPage, SearchResult};
use tracing::debug;

use crate::carousel::{wrap_advance, wrap_retreat};

/// Stable user-visible message for a failed search. The typed error goes to
/// the log; this string goes to the presentation layer.
pub const SEARCH_FAILURE_MESSAGE: &str = "Failed to fetch results.";

/// The ordered result list and its focus index.
///
/// The focus invariant `focus < len` holds whenever the list is non-empty;
/// an empty list keeps `focus == 0` as an inactive placeholder. All focus
/// mutation funnels through the methods here.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    items: Vec<SearchResult>,
    focus: usize,
    page: u32,
    total_pages: u32,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SearchResult] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&SearchResult> {
        self.items.get(self.focus)
    }

    pub fn focused_key(&self) -> Option<MediaKey> {
        self.focused().map(|item| item.key)
    }

    /// Step the focus forward, wrapping past the end. No-op when empty.
    pub fn advance(&mut self) {
        self.focus = wrap_advance(self.focus, self.items.len());
    }

    /// Step the focus backward, wrapping past the start. No-op when empty.
    pub fn retreat(&mut self) {
        self.focus = wrap_retreat(self.focus, self.items.len());
    }

    /// Jump the focus to an absolute index. Out-of-range indices are ignored.
    pub fn set_focus(&mut self, index: usize) {
        if index < self.items.len() {
            self.focus = index;
        }
    }

    /// Replace the whole list with a fresh page; the focus resets to 0.
    pub fn replace(&mut self, page: SearchPage) {
        self.items = page.results;
        self.focus = 0;
        self.page = page.page;
        self.total_pages = page.total_pages;
    }

    /// Append a follow-up page; the focus is preserved.
    pub fn merge(&mut self, page: SearchPage) {
        self.items.extend(page.results);
        self.page = page.page;
        self.total_pages = page.total_pages;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.focus = 0;
        self.page = 0;
        self.total_pages = 0;
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether the provider reported pages beyond the last applied one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// What a query commit asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The query was empty or whitespace: state cleared, nothing to fetch.
    Cleared,
    /// Fetch page 1 for this committed query.
    Fetch(String),
}

/// One browsing session's query state.
///
/// `raw_query` follows every keystroke; `committed_query` changes only when
/// a commit fires (debounce elapsing, or an explicit submit). Responses are
/// applied only while their query is still the committed one.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    raw_query: String,
    committed_query: Option<String>,
    pub results: ResultSet,
    pub is_searching: bool,
    pub error: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn committed_query(&self) -> Option<&str> {
        self.committed_query.as_deref()
    }

    /// Record a keystroke. Commit happens separately, after the debounce.
    pub fn set_raw_query(&mut self, query: String) {
        self.raw_query = query;
    }

    /// Commit whatever is currently typed. A blank query clears the session
    /// instead of fetching.
    pub fn commit_current(&mut self) -> CommitOutcome {
        if self.raw_query.trim().is_empty() {
            self.committed_query = None;
            self.results.clear();
            self.is_searching = false;
            self.error = None;
            return CommitOutcome::Cleared;
        }
        let query = self.raw_query.clone();
        self.committed_query = Some(query.clone());
        self.is_searching = true;
        self.error = None;
        CommitOutcome::Fetch(query)
    }

    /// Apply a search response. Returns false (leaving all state untouched)
    /// when `query` is no longer the committed one. Page 1 replaces the
    /// list; later pages merge and keep the focus.
    pub fn apply_results(&mut self, query: &str, page: SearchPage) -> bool {
        if self.committed_query.as_deref() != Some(query) {
            debug!(stale = query, "discarding results for a superseded query");
            return false;
        }
        self.is_searching = false;
        self.error = None;
        if page.page > 1 {
            self.results.merge(page);
        } else {
            self.results.replace(page);
        }
        true
    }

    /// Surface a search failure. The result set keeps its previous value;
    /// stale failures are discarded like stale results.
    pub fn apply_error(&mut self, query: &str, message: impl Into<String>) -> bool {
        if self.committed_query.as_deref() != Some(query) {
            return false;
        }
        self.is_searching = false;
        self.error = Some(message.into());
        true
    }

    /// The `(query, page)` a load-more should fetch, if any pages remain.
    pub fn next_page_request(&self) -> Option<(String, u32)> {
        let query = self.committed_query.clone()?;
        if !self.results.has_more() {
            return None;
        }
        Some((query, self.results.page() + 1))
    }

    /// Reset everything, the typed query included. Used for Escape and the
    /// clear button rather than waiting out a debounce.
    pub fn clear(&mut self) {
        self.raw_query.clear();
        self.committed_query = None;
        self.results.clear();
        self.is_searching = false;
        self.error = None;
    }
}

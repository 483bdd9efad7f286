use std::collections::BTreeMap;

use url::Url;

use crate::action_executor::{LaunchError, TabOpener};
use crate::clipboard::ClipboardWriter;
use crate::composer::compose;
use crate::highlight::{highlight_for_display, Highlighted};
use crate::model::{Filter, FilterDraft, FilterKind};
use crate::web_search::search_url;

pub const EMPTY_QUERY_PLACEHOLDER: &str = "Enter a search term or add a filter to build a query.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Placeholder(&'static str),
    Query(Highlighted),
}

/// State behind the query-builder form: base term, the filter kind picked in
/// the dropdown and the ordered filter list. Lives for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderState {
    term: String,
    selected_kind: FilterKind,
    filters: Vec<Filter>,
}

impl BuilderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_term(&mut self, term: &str) {
        self.term = term.to_string();
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn select_kind(&mut self, kind: FilterKind) {
        self.selected_kind = kind;
    }

    pub fn selected_kind(&self) -> FilterKind {
        self.selected_kind
    }

    /// Slots the form has to show for the selected kind.
    pub fn required_slots(&self) -> &'static [&'static str] {
        self.selected_kind.required_slots()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Appends the filter when every required slot is filled; otherwise does nothing.
    pub fn add_filter(&mut self, draft: &FilterDraft) -> bool {
        match Filter::from_draft(draft) {
            Some(filter) => {
                tracing::debug!(kind = %filter.kind(), position = self.filters.len(), "filter added");
                self.filters.push(filter);
                true
            }
            None => {
                tracing::debug!(kind = %draft.kind, "incomplete filter ignored");
                false
            }
        }
    }

    pub fn add_selected(&mut self, values: BTreeMap<String, String>) -> bool {
        let draft = FilterDraft {
            kind: self.selected_kind,
            values,
        };
        self.add_filter(&draft)
    }

    /// Removes by current position; later filters shift down by one.
    pub fn remove_filter(&mut self, index: usize) -> Option<Filter> {
        if index >= self.filters.len() {
            return None;
        }
        Some(self.filters.remove(index))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn query(&self) -> String {
        compose(&self.term, &self.filters)
    }

    pub fn preview(&self) -> Preview {
        let query = self.query();
        if query.is_empty() {
            Preview::Placeholder(EMPTY_QUERY_PLACEHOLDER)
        } else {
            Preview::Query(highlight_for_display(&query))
        }
    }

    pub fn search_url(&self, endpoint: &Url) -> Option<Url> {
        let query = self.query();
        if query.is_empty() {
            return None;
        }
        Some(search_url(endpoint, &query))
    }

    /// Opens the search in a new tab. `Ok(false)` means there was nothing to search.
    pub fn open_search(
        &self,
        endpoint: &Url,
        opener: &mut dyn TabOpener,
    ) -> Result<bool, LaunchError> {
        let Some(url) = self.search_url(endpoint) else {
            return Ok(false);
        };
        opener.open(url.as_str())?;
        tracing::info!(url = %url, "search opened");
        Ok(true)
    }

    /// Copies the query text. Failures are logged and reported as `false`.
    pub fn copy_query(&self, clipboard: &mut dyn ClipboardWriter) -> bool {
        let query = self.query();
        if query.is_empty() {
            return false;
        }
        match clipboard.write_text(&query) {
            Ok(()) => {
                tracing::info!(chars = query.chars().count(), "query copied");
                true
            }
            Err(error) => {
                tracing::warn!(%error, "failed to copy query");
                false
            }
        }
    }
}

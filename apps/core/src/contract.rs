use serde::{Deserialize, Serialize};

use crate::highlight::Segment;
use crate::composer::fragment;
use crate::model::{Filter, FilterKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComposeRequest {
    pub term: String,
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimpleSearchRequest {
    pub term: String,
    pub filetype: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightRequest {
    pub query: String,
}

/// One row of the filter list: the badge label next to the fragment it adds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterEntry {
    pub kind: FilterKind,
    pub label: String,
    pub fragment: String,
}

impl FilterEntry {
    /// `None` for filters that contribute nothing to the query.
    pub fn from_filter(filter: &Filter) -> Option<Self> {
        let kind = filter.kind();
        Some(Self {
            kind,
            label: kind.label().to_string(),
            fragment: fragment(filter)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComposeResponse {
    pub query: String,
    pub html: String,
    #[serde(default)]
    pub filters: Vec<FilterEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchUrlResponse {
    pub query: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightResponse {
    pub html: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreRequest {
    Compose(ComposeRequest),
    SearchUrl(ComposeRequest),
    SimpleSearch(SimpleSearchRequest),
    Highlight(HighlightRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum CoreResponse {
    Compose(ComposeResponse),
    SearchUrl(SearchUrlResponse),
    Highlight(HighlightResponse),
}

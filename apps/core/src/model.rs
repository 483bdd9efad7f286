use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const SLOT_VALUE: &str = "value";
pub const SLOT_TERM1: &str = "term1";
pub const SLOT_TERM2: &str = "term2";

const SINGLE_SLOT: &[&str] = &[SLOT_VALUE];
const PAIR_SLOTS: &[&str] = &[SLOT_TERM1, SLOT_TERM2];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    Site,
    Filetype,
    Exclude,
    Exact,
    Or,
    And,
    InTitle,
    InUrl,
    InText,
    Related,
    Cache,
}

impl FilterKind {
    pub const ALL: [FilterKind; 11] = [
        FilterKind::Site,
        FilterKind::Filetype,
        FilterKind::Exclude,
        FilterKind::Exact,
        FilterKind::Or,
        FilterKind::And,
        FilterKind::InTitle,
        FilterKind::InUrl,
        FilterKind::InText,
        FilterKind::Related,
        FilterKind::Cache,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Site => "site",
            Self::Filetype => "filetype",
            Self::Exclude => "exclude",
            Self::Exact => "exact",
            Self::Or => "or",
            Self::And => "and",
            Self::InTitle => "intitle",
            Self::InUrl => "inurl",
            Self::InText => "intext",
            Self::Related => "related",
            Self::Cache => "cache",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
    }

    /// Badge text shown next to a filter in the list.
    pub fn label(self) -> &'static str {
        match self {
            Self::Site => "Site",
            Self::Filetype => "File type",
            Self::Exclude => "Exclude",
            Self::Exact => "Exact phrase",
            Self::Or => "OR",
            Self::And => "AND",
            Self::InTitle => "In title",
            Self::InUrl => "In URL",
            Self::InText => "In text",
            Self::Related => "Related",
            Self::Cache => "Cache",
        }
    }

    /// Operator keyword for kinds rendered as `<keyword>:<value>`.
    pub fn operator_keyword(self) -> Option<&'static str> {
        match self {
            Self::Site
            | Self::Filetype
            | Self::InTitle
            | Self::InUrl
            | Self::InText
            | Self::Related
            | Self::Cache => Some(self.as_str()),
            Self::Exclude | Self::Exact | Self::Or | Self::And => None,
        }
    }

    pub fn required_slots(self) -> &'static [&'static str] {
        match self {
            Self::Or | Self::And => PAIR_SLOTS,
            _ => SINGLE_SLOT,
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw form submission: a kind plus whatever the user typed into each slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDraft {
    pub kind: FilterKind,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl FilterDraft {
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            values: BTreeMap::new(),
        }
    }

    pub fn single(kind: FilterKind, value: &str) -> Self {
        Self::new(kind).with_slot(SLOT_VALUE, value)
    }

    pub fn pair(kind: FilterKind, term1: &str, term2: &str) -> Self {
        Self::new(kind)
            .with_slot(SLOT_TERM1, term1)
            .with_slot(SLOT_TERM2, term2)
    }

    pub fn with_slot(mut self, slot: &str, value: &str) -> Self {
        self.values.insert(slot.to_string(), value.to_string());
        self
    }

    fn slot(&self, name: &str) -> Option<String> {
        let value = self.values.get(name)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Filter {
    Site { value: String },
    Filetype { value: String },
    Exclude { value: String },
    Exact { value: String },
    Or { term1: String, term2: String },
    And { term1: String, term2: String },
    InTitle { value: String },
    InUrl { value: String },
    InText { value: String },
    Related { value: String },
    Cache { value: String },
}

impl Filter {
    /// Returns `None` when any slot the kind requires is missing or blank.
    pub fn from_draft(draft: &FilterDraft) -> Option<Self> {
        let filter = match draft.kind {
            FilterKind::Or => Self::Or {
                term1: draft.slot(SLOT_TERM1)?,
                term2: draft.slot(SLOT_TERM2)?,
            },
            FilterKind::And => Self::And {
                term1: draft.slot(SLOT_TERM1)?,
                term2: draft.slot(SLOT_TERM2)?,
            },
            FilterKind::Exact => {
                let value = sanitize_phrase(&draft.slot(SLOT_VALUE)?);
                if value.is_empty() {
                    return None;
                }
                Self::Exact { value }
            }
            kind => Self::single(kind, draft.slot(SLOT_VALUE)?)?,
        };
        Some(filter)
    }

    /// Builds a single-slot filter. `Or` and `And` need two terms and yield `None`.
    pub fn single(kind: FilterKind, value: String) -> Option<Self> {
        let filter = match kind {
            FilterKind::Site => Self::Site { value },
            FilterKind::Filetype => Self::Filetype { value },
            FilterKind::Exclude => Self::Exclude { value },
            FilterKind::Exact => Self::Exact { value },
            FilterKind::InTitle => Self::InTitle { value },
            FilterKind::InUrl => Self::InUrl { value },
            FilterKind::InText => Self::InText { value },
            FilterKind::Related => Self::Related { value },
            FilterKind::Cache => Self::Cache { value },
            FilterKind::Or | FilterKind::And => return None,
        };
        Some(filter)
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Site { .. } => FilterKind::Site,
            Self::Filetype { .. } => FilterKind::Filetype,
            Self::Exclude { .. } => FilterKind::Exclude,
            Self::Exact { .. } => FilterKind::Exact,
            Self::Or { .. } => FilterKind::Or,
            Self::And { .. } => FilterKind::And,
            Self::InTitle { .. } => FilterKind::InTitle,
            Self::InUrl { .. } => FilterKind::InUrl,
            Self::InText { .. } => FilterKind::InText,
            Self::Related { .. } => FilterKind::Related,
            Self::Cache { .. } => FilterKind::Cache,
        }
    }
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Exact phrases cannot nest quotes, so embedded `"` are dropped.
pub fn sanitize_phrase(input: &str) -> String {
    input.replace('"', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{normalize_whitespace, Filter, FilterDraft, FilterKind, SLOT_TERM1};

    #[test]
    fn parses_kind_names_case_insensitively() {
        assert_eq!(FilterKind::parse(" InTitle "), Some(FilterKind::InTitle));
        assert_eq!(FilterKind::parse("FILETYPE"), Some(FilterKind::Filetype));
        assert_eq!(FilterKind::parse("nope"), None);
    }

    #[test]
    fn draft_trims_and_requires_every_slot() {
        let site = Filter::from_draft(&FilterDraft::single(FilterKind::Site, "  example.com "));
        assert_eq!(
            site,
            Some(Filter::Site {
                value: "example.com".to_string()
            })
        );

        let half_or = FilterDraft::new(FilterKind::Or).with_slot(SLOT_TERM1, "a");
        assert!(Filter::from_draft(&half_or).is_none());
        assert!(Filter::from_draft(&FilterDraft::pair(FilterKind::And, "a", "   ")).is_none());
        assert!(Filter::from_draft(&FilterDraft::single(FilterKind::Cache, "\t")).is_none());
    }

    #[test]
    fn exact_draft_of_only_quotes_is_rejected() {
        assert!(Filter::from_draft(&FilterDraft::single(FilterKind::Exact, r#" "" "#)).is_none());
    }

    #[test]
    fn kind_round_trips_through_filter() {
        for kind in FilterKind::ALL {
            let draft = if kind.required_slots().len() == 2 {
                FilterDraft::pair(kind, "x", "y")
            } else {
                FilterDraft::single(kind, "x")
            };
            let filter = Filter::from_draft(&draft).expect("draft should be valid");
            assert_eq!(filter.kind(), kind);
        }
    }

    #[test]
    fn serializes_with_kind_tag() {
        let encoded = serde_json::to_string(&Filter::InUrl {
            value: "docs".to_string(),
        })
        .unwrap();
        assert_eq!(encoded, r#"{"kind":"inurl","value":"docs"}"#);
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize_whitespace("  a \t  b\n c  "), "a b c");
        assert_eq!(normalize_whitespace("   "), "");
    }
}

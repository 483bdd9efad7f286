use crate::model::{normalize_whitespace, sanitize_phrase, Filter};

/// Builds the final query: the normalized base term followed by one fragment
/// per filter, in sequence order, separated by single spaces.
pub fn compose(base_term: &str, filters: &[Filter]) -> String {
    let term = normalize_whitespace(base_term);
    let mut parts = Vec::with_capacity(filters.len() + 1);
    if !term.is_empty() {
        parts.push(term);
    }
    parts.extend(filters.iter().filter_map(fragment));
    parts.join(" ")
}

/// The text a single filter contributes, or `None` when a required slot is blank.
pub fn fragment(filter: &Filter) -> Option<String> {
    match filter {
        Filter::Site { value }
        | Filter::Filetype { value }
        | Filter::InTitle { value }
        | Filter::InUrl { value }
        | Filter::InText { value }
        | Filter::Related { value }
        | Filter::Cache { value } => {
            let value = non_blank(value)?;
            let keyword = filter.kind().operator_keyword()?;
            Some(format!("{keyword}:{value}"))
        }
        Filter::Exclude { value } => Some(format!("-{}", non_blank(value)?)),
        Filter::Exact { value } => {
            let phrase = sanitize_phrase(value);
            if phrase.is_empty() {
                return None;
            }
            Some(format!("\"{phrase}\""))
        }
        Filter::Or { term1, term2 } => {
            Some(format!("({} OR {})", non_blank(term1)?, non_blank(term2)?))
        }
        Filter::And { term1, term2 } => {
            Some(format!("({} AND {})", non_blank(term1)?, non_blank(term2)?))
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

use thiserror::Error;

use crate::model::{Filter, FilterDraft, FilterKind};

const PAIR_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DslError {
    #[error("filter spec is empty")]
    Empty,
    #[error("unknown filter kind '{0}'")]
    UnknownKind(String),
    #[error("filter spec '{0}' must look like kind:value")]
    MissingSeparator(String),
    #[error("filter spec '{0}' needs two terms separated by '|'")]
    MissingPairSeparator(String),
    #[error("filter spec '{0}' has an empty value")]
    EmptySlot(String),
}

/// Parses one textual filter spec.
///
/// Accepted forms: `kind:value`, `or:a|b`, `and:a|b`, `-value` (exclude) and a
/// fully quoted `"phrase"` (exact). Kind names are case-insensitive.
pub fn parse_filter_spec(spec: &str) -> Result<Filter, DslError> {
    let draft = parse_draft(spec)?;
    Filter::from_draft(&draft).ok_or_else(|| DslError::EmptySlot(spec.trim().to_string()))
}

pub fn parse_filter_specs<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Filter>, DslError> {
    specs
        .iter()
        .map(|spec| parse_filter_spec(spec.as_ref()))
        .collect()
}

pub fn parse_draft(spec: &str) -> Result<FilterDraft, DslError> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(DslError::Empty);
    }

    if let Some(phrase) = strip_enclosing_quotes(trimmed) {
        return Ok(FilterDraft::single(FilterKind::Exact, phrase));
    }
    if let Some(rest) = trimmed.strip_prefix('-') {
        return Ok(FilterDraft::single(FilterKind::Exclude, rest));
    }

    let Some((name, value)) = trimmed.split_once(':') else {
        return Err(DslError::MissingSeparator(trimmed.to_string()));
    };
    let kind = parse_kind(name).ok_or_else(|| DslError::UnknownKind(name.trim().to_string()))?;

    match kind {
        FilterKind::Or | FilterKind::And => {
            let Some((term1, term2)) = value.split_once(PAIR_SEPARATOR) else {
                return Err(DslError::MissingPairSeparator(trimmed.to_string()));
            };
            Ok(FilterDraft::pair(kind, term1, term2))
        }
        _ => Ok(FilterDraft::single(kind, value)),
    }
}

fn parse_kind(name: &str) -> Option<FilterKind> {
    if let Some(kind) = FilterKind::parse(name) {
        return Some(kind);
    }
    match name.trim().to_ascii_lowercase().as_str() {
        "ext" | "type" => Some(FilterKind::Filetype),
        "phrase" => Some(FilterKind::Exact),
        "not" | "minus" => Some(FilterKind::Exclude),
        _ => None,
    }
}

fn strip_enclosing_quotes(token: &str) -> Option<&str> {
    if token.len() < 2 {
        return None;
    }
    token.strip_prefix('"')?.strip_suffix('"')
}

#[cfg(test)]
mod tests {
    use super::{parse_filter_spec, parse_filter_specs, DslError};
    use crate::model::{Filter, FilterKind};

    #[test]
    fn parses_every_canonical_kind() {
        for kind in FilterKind::ALL {
            let spec = match kind {
                FilterKind::Or | FilterKind::And => format!("{kind}:a|b"),
                _ => format!("{kind}:a"),
            };
            let filter = parse_filter_spec(&spec).unwrap();
            assert_eq!(filter.kind(), kind, "spec {spec}");
        }
    }

    #[test]
    fn kind_aliases_map_to_canonical_kinds() {
        for (spec, kind) in [
            ("ext:pdf", FilterKind::Filetype),
            ("TYPE:pdf", FilterKind::Filetype),
            ("phrase:hello world", FilterKind::Exact),
            ("not:ads", FilterKind::Exclude),
            ("Minus:ads", FilterKind::Exclude),
        ] {
            assert_eq!(parse_filter_spec(spec).unwrap().kind(), kind, "spec {spec}");
        }
        assert_eq!(
            parse_filter_spec("phrase:hello world").unwrap(),
            Filter::Exact {
                value: "hello world".to_string()
            }
        );
    }

    #[test]
    fn parses_shorthand_forms() {
        assert_eq!(
            parse_filter_spec("-ads").unwrap(),
            Filter::Exclude {
                value: "ads".to_string()
            }
        );
        assert_eq!(
            parse_filter_spec("\"hello world\"").unwrap(),
            Filter::Exact {
                value: "hello world".to_string()
            }
        );
        assert_eq!(
            parse_filter_spec("EXT:pdf").unwrap(),
            Filter::Filetype {
                value: "pdf".to_string()
            }
        );
    }

    #[test]
    fn keeps_colons_inside_values() {
        assert_eq!(
            parse_filter_spec("inurl:https://a.b").unwrap(),
            Filter::InUrl {
                value: "https://a.b".to_string()
            }
        );
    }

    #[test]
    fn reports_malformed_specs() {
        assert_eq!(parse_filter_spec("  "), Err(DslError::Empty));
        assert_eq!(
            parse_filter_spec("color:red"),
            Err(DslError::UnknownKind("color".to_string()))
        );
        assert_eq!(
            parse_filter_spec("cats"),
            Err(DslError::MissingSeparator("cats".to_string()))
        );
        assert_eq!(
            parse_filter_spec("or:a"),
            Err(DslError::MissingPairSeparator("or:a".to_string()))
        );
        assert_eq!(
            parse_filter_spec("site:  "),
            Err(DslError::EmptySlot("site:".to_string()))
        );
        assert_eq!(
            parse_filter_spec("-"),
            Err(DslError::EmptySlot("-".to_string()))
        );
    }

    #[test]
    fn stops_at_first_bad_spec() {
        let specs = ["site:a.org".to_string(), "bogus".to_string()];
        assert!(parse_filter_specs(&specs).is_err());
    }
}

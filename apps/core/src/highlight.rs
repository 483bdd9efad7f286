//! Presentation-only markup for composed queries.
//!
//! Segmentation never changes character content: concatenating the segment
//! texts always reproduces the input exactly.

use serde::{Deserialize, Serialize};

pub const HIGHLIGHTED_OPERATORS: [&str; 7] = [
    "site:",
    "filetype:",
    "intitle:",
    "inurl:",
    "intext:",
    "related:",
    "cache:",
];

const CONNECTIVES: [&str; 2] = ["OR", "AND"];

const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Plain,
    Operator,
    Value,
    Phrase,
    Connective,
}

impl SegmentKind {
    fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Operator => Some("qc-operator"),
            Self::Value => Some("qc-value"),
            Self::Phrase => Some("qc-phrase"),
            Self::Connective => Some("qc-connective"),
        }
    }

    fn ansi_style(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Operator => Some("\x1b[1;34m"),
            Self::Value => Some("\x1b[36m"),
            Self::Phrase => Some("\x1b[32m"),
            Self::Connective => Some("\x1b[1;35m"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlighted {
    pub segments: Vec<Segment>,
}

impl Highlighted {
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            let escaped = escape_html(&segment.text);
            match segment.kind.css_class() {
                Some(class) => {
                    out.push_str(&format!("<span class=\"{class}\">{escaped}</span>"));
                }
                None => out.push_str(&escaped),
            }
        }
        out
    }

    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment.kind.ansi_style() {
                Some(style) => {
                    out.push_str(style);
                    out.push_str(&segment.text);
                    out.push_str(ANSI_RESET);
                }
                None => out.push_str(&segment.text),
            }
        }
        out
    }

    fn push(&mut self, kind: SegmentKind, text: &str) {
        if text.is_empty() {
            return;
        }
        if kind == SegmentKind::Plain {
            if let Some(last) = self.segments.last_mut() {
                if last.kind == SegmentKind::Plain {
                    last.text.push_str(text);
                    return;
                }
            }
        }
        self.segments.push(Segment {
            kind,
            text: text.to_string(),
        });
    }
}

pub fn highlight_for_display(query: &str) -> Highlighted {
    let mut out = Highlighted::default();
    let mut plain_start = 0;
    let mut index = 0;
    let mut prev: Option<char> = None;

    while index < query.len() {
        let rest = &query[index..];

        let matched = if let Some(len) = match_phrase(rest) {
            Some((SegmentKind::Phrase, len))
        } else if prev.map_or(true, is_token_boundary) {
            match_operator(rest)
                .map(|len| (SegmentKind::Operator, len))
                .or_else(|| match_connective(rest).map(|len| (SegmentKind::Connective, len)))
        } else {
            None
        };

        if let Some((kind, len)) = matched {
            out.push(SegmentKind::Plain, &query[plain_start..index]);
            out.push(kind, &rest[..len]);
            index += len;

            if kind == SegmentKind::Operator {
                let value_len = value_run(&query[index..]);
                out.push(SegmentKind::Value, &query[index..index + value_len]);
                index += value_len;
            }

            prev = query[..index].chars().next_back();
            plain_start = index;
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        index += ch.len_utf8();
        prev = Some(ch);
    }

    out.push(SegmentKind::Plain, &query[plain_start..]);
    out
}

/// Removes tags produced by [`Highlighted::to_html`] and reverses its escaping.
pub fn strip_markup(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    unescape_html(&text)
}

fn match_phrase(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix('"')?;
    let close = body.find('"')?;
    Some(close + 2)
}

fn match_operator(rest: &str) -> Option<usize> {
    HIGHLIGHTED_OPERATORS.iter().find_map(|operator| {
        let head = rest.get(..operator.len())?;
        head.eq_ignore_ascii_case(operator).then_some(operator.len())
    })
}

fn match_connective(rest: &str) -> Option<usize> {
    CONNECTIVES.iter().find_map(|word| {
        let tail = rest.strip_prefix(word)?;
        let ends_token = tail
            .chars()
            .next()
            .map_or(true, |ch| ch.is_whitespace() || ch == ')');
        ends_token.then_some(word.len())
    })
}

fn value_run(rest: &str) -> usize {
    rest.char_indices()
        .find(|(_, ch)| ch.is_whitespace() || *ch == ')' || *ch == '"')
        .map_or(rest.len(), |(offset, _)| offset)
}

fn is_token_boundary(ch: char) -> bool {
    ch.is_whitespace() || ch == '(' || ch == '-'
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape_html(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::{highlight_for_display, strip_markup, SegmentKind};

    fn kinds(query: &str) -> Vec<(SegmentKind, String)> {
        highlight_for_display(query)
            .segments
            .into_iter()
            .map(|s| (s.kind, s.text))
            .collect()
    }

    #[test]
    fn marks_operator_and_value() {
        assert_eq!(
            kinds("cats site:wikipedia.org"),
            vec![
                (SegmentKind::Plain, "cats ".to_string()),
                (SegmentKind::Operator, "site:".to_string()),
                (SegmentKind::Value, "wikipedia.org".to_string()),
            ]
        );
    }

    #[test]
    fn operator_inside_a_word_is_plain() {
        assert_eq!(
            kinds("website:x"),
            vec![(SegmentKind::Plain, "website:x".to_string())]
        );
    }

    #[test]
    fn unmatched_quote_stays_plain() {
        assert_eq!(
            kinds("say \"hi"),
            vec![(SegmentKind::Plain, "say \"hi".to_string())]
        );
    }

    #[test]
    fn marks_phrase_and_connective() {
        let segments = kinds("(a OR b) \"x y\"");
        assert!(segments.contains(&(SegmentKind::Connective, "OR".to_string())));
        assert!(segments.contains(&(SegmentKind::Phrase, "\"x y\"".to_string())));
    }

    #[test]
    fn lowercase_or_is_not_a_connective() {
        assert_eq!(
            kinds("black or white"),
            vec![(SegmentKind::Plain, "black or white".to_string())]
        );
    }

    #[test]
    fn escapes_html_and_strips_back() {
        let query = "a<b> & 'c' intitle:\"x\"";
        let html = highlight_for_display(query).to_html();
        assert!(!html.contains("<b>"));
        assert_eq!(strip_markup(&html), query);
    }
}

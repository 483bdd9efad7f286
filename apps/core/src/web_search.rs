use url::form_urlencoded;
use url::Url;

use crate::composer::compose;
use crate::model::Filter;

pub const GOOGLE_SEARCH_ENDPOINT: &str = "https://www.google.com/search";
pub const QUERY_PARAM: &str = "q";

/// Sets `q` on `endpoint`, replacing any existing query string.
pub fn search_url(endpoint: &Url, query: &str) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair(QUERY_PARAM, query);
    url
}

/// Reduced form: a term plus at most one `filetype:` and one `site:` filter.
pub fn build_search_url(term: &str, filetype: &str, site: &str) -> String {
    let filters = [
        Filter::Filetype {
            value: filetype.trim().to_string(),
        },
        Filter::Site {
            value: site.trim().to_string(),
        },
    ];
    let query = compose(term, &filters);
    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair(QUERY_PARAM, &query)
        .finish();
    format!("{GOOGLE_SEARCH_ENDPOINT}?{encoded}")
}

/// Reads `q` back out of a search URL.
pub fn decode_query(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::{build_search_url, decode_query, search_url};
    use url::Url;

    #[test]
    fn replaces_existing_query_string() {
        let endpoint = Url::parse("https://example.com/find?q=old&lang=en").unwrap();
        let url = search_url(&endpoint, "new term");
        assert_eq!(url.as_str(), "https://example.com/find?q=new+term");
    }

    #[test]
    fn simple_variant_omits_blank_parts() {
        let url = build_search_url("  rust   book ", " ", "");
        assert_eq!(decode_query(&url).as_deref(), Some("rust book"));
    }

    #[test]
    fn encodes_operators_and_quotes() {
        let endpoint = Url::parse("https://www.google.com/search").unwrap();
        let url = search_url(&endpoint, "\"a b\" (x OR y) -z");
        assert!(!url.as_str().contains(' '));
        assert!(!url.as_str().contains('"'));
        assert_eq!(
            decode_query(url.as_str()).as_deref(),
            Some("\"a b\" (x OR y) -z")
        );
    }
}

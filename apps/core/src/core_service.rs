use thiserror::Error;
use url::Url;

use crate::composer::compose;
use crate::config::{validate, Config, ConfigError};
use crate::contract::{
    ComposeRequest, ComposeResponse, CoreRequest, CoreResponse, FilterEntry, HighlightResponse,
    SearchUrlResponse, SimpleSearchRequest,
};
use crate::highlight::highlight_for_display;
use crate::model::Filter;
use crate::web_search::{build_search_url, search_url};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("query is empty; enter a term or add a filter")]
    EmptyQuery,
}

pub struct CoreService {
    endpoint: Url,
}

impl CoreService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        validate(&config)?;
        let endpoint = config.endpoint()?;
        Ok(Self { endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn handle_command(&self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Compose(request) => {
                let query = compose(&request.term, &request.filters);
                let html = highlight_for_display(&query).to_html();
                let filters = request.filters.iter().filter_map(FilterEntry::from_filter).collect();
                Ok(CoreResponse::Compose(ComposeResponse {
                    query,
                    html,
                    filters,
                }))
            }
            CoreRequest::SearchUrl(request) => {
                let (query, url) = self.search_url_for(&request)?;
                Ok(CoreResponse::SearchUrl(SearchUrlResponse {
                    query,
                    url: url.into(),
                }))
            }
            CoreRequest::SimpleSearch(request) => self.simple_search(&request),
            CoreRequest::Highlight(request) => {
                let highlighted = highlight_for_display(&request.query);
                Ok(CoreResponse::Highlight(HighlightResponse {
                    html: highlighted.to_html(),
                    segments: highlighted.segments,
                }))
            }
        }
    }

    pub fn search_url_for(&self, request: &ComposeRequest) -> Result<(String, Url), ServiceError> {
        let query = compose(&request.term, &request.filters);
        if query.is_empty() {
            return Err(ServiceError::EmptyQuery);
        }
        let url = search_url(&self.endpoint, &query);
        tracing::debug!(%url, "search url built");
        Ok((query, url))
    }

    fn simple_search(&self, request: &SimpleSearchRequest) -> Result<CoreResponse, ServiceError> {
        let filetype = request.filetype.as_deref().unwrap_or_default();
        let site = request.site.as_deref().unwrap_or_default();
        let query = compose(
            &request.term,
            &[
                Filter::Filetype {
                    value: filetype.to_string(),
                },
                Filter::Site {
                    value: site.to_string(),
                },
            ],
        );
        if query.is_empty() {
            return Err(ServiceError::EmptyQuery);
        }
        Ok(CoreResponse::SearchUrl(SearchUrlResponse {
            query,
            url: build_search_url(&request.term, filetype, site),
        }))
    }
}

pub mod action_executor;
pub mod builder_state;
pub mod clipboard;
pub mod composer;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod highlight;
pub mod logging;
pub mod model;
pub mod query_dsl;
pub mod runtime;
pub mod transport;
pub mod web_search;

pub use composer::{compose, fragment};
pub use highlight::highlight_for_display;
pub use model::{Filter, FilterDraft, FilterKind};
pub use web_search::build_search_url;

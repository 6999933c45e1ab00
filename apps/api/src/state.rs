use std::sync::Arc;

use crate::config::Config;
use crate::textrazor::KeywordExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable extractor. `TextRazorClient` when an API key is configured, else `OfflineExtractor`.
    pub extractor: Arc<dyn KeywordExtractor>,
}

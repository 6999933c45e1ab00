// Text analysis engine: keyword extraction tiers plus readability and density metrics.
// Only textrazor talks to the external service; everything here is pure apart from
// the single extractor call in the orchestrator.

pub mod fallback;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod normalizer;
pub mod orchestrator;

//! Analysis Orchestrator — picks the keyword tier for a text and assembles the result.
//!
//! Tiers, tried in order until one yields keywords:
//! 1. External extraction, normalized.
//! 2. Local frequency fallback (also taken on any adapter failure).
//! 3. Minimal synthesis from the text's own tokens.
//!
//! `resolve_keywords` is the pure state machine over an adapter outcome, so every
//! transition can be exercised without a network.

use anyhow::Context;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::fallback::{extract_keywords, synthesize_minimal};
use crate::analysis::metrics::calculate_metrics;
use crate::analysis::models::{AnalysisResult, Keyword, KeywordSource};
use crate::analysis::normalizer::normalize;
use crate::textrazor::{AdapterError, ExtractionResult, KeywordExtractor};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("text is empty or blank")]
    InvalidInput,

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Final keyword list, tagged with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordResolution {
    Normalized(Vec<Keyword>),
    Fallback(Vec<Keyword>),
    MinimalSynthesis(Vec<Keyword>),
}

impl KeywordResolution {
    pub fn source(&self) -> KeywordSource {
        match self {
            KeywordResolution::Normalized(_) => KeywordSource::Normalized,
            KeywordResolution::Fallback(_) => KeywordSource::Fallback,
            KeywordResolution::MinimalSynthesis(_) => KeywordSource::MinimalSynthesis,
        }
    }

    pub fn into_keywords(self) -> Vec<Keyword> {
        match self {
            KeywordResolution::Normalized(k)
            | KeywordResolution::Fallback(k)
            | KeywordResolution::MinimalSynthesis(k) => k,
        }
    }
}

/// A completed analysis and the tier its keywords came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub result: AnalysisResult,
    pub source: KeywordSource,
}

/// Runs one analysis: a single extractor call, then the local tiers as needed.
/// Extractor failures are logged and recovered; only blank input is rejected.
pub async fn analyze(
    text: &str,
    extractor: &dyn KeywordExtractor,
) -> Result<Analysis, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::InvalidInput);
    }

    let extraction = extractor.extract(text).await;
    let resolution = resolve_keywords(text, extraction);
    let source = resolution.source();
    let keywords = resolution.into_keywords();

    let metrics =
        calculate_metrics(text, &keywords).context("Failed to build keyword density matcher")?;

    Ok(Analysis {
        result: AnalysisResult { keywords, metrics },
        source,
    })
}

/// Chooses the keyword tier for `text` given the extractor's outcome.
pub fn resolve_keywords(
    text: &str,
    extraction: Result<ExtractionResult, AdapterError>,
) -> KeywordResolution {
    match extraction {
        Ok(extraction) => {
            let keywords = normalize(&extraction);
            if !keywords.is_empty() {
                return KeywordResolution::Normalized(keywords);
            }
            info!("External extraction produced no keywords, using local fallback");
        }
        Err(e) => warn!("Keyword extraction failed, using local fallback: {e}"),
    }

    let keywords = extract_keywords(text);
    if !keywords.is_empty() {
        return KeywordResolution::Fallback(keywords);
    }

    warn!("No keywords from local fallback, synthesizing from raw tokens");
    KeywordResolution::MinimalSynthesis(synthesize_minimal(text))
}

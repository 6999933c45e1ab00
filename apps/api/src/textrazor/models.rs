//! Wire types for the TextRazor analysis payload.
//!
//! Every collection and field is optional on the wire; missing or `null` values
//! deserialize as their defaults so the normalizer never has to branch on presence.

use serde::{Deserialize, Deserializer};

/// Top-level TextRazor body. The interesting part lives under `response`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRazorEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: ExtractionResult,
}

/// Structured extraction result: entities, topics and phrases with relevance scores.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<Entity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<Topic>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phrases: Vec<Phrase>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relevance_score: f64,
    #[serde(default)]
    pub matched_text: Option<String>,
    /// DBpedia-style class labels, most specific first.
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default, deserialize_with = "whole_count")]
    pub frequency: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Topic {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(default, deserialize_with = "whole_count")]
    pub frequency: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub relevance_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub words: Vec<PhraseWord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhraseWord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Occurrence counts arrive as JSON numbers, sometimes fractional (`2.0`).
/// Rounded to the nearest whole count; negative or non-finite values are dropped.
fn whole_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = Option::<f64>::deserialize(deserializer)?;
    Ok(count
        .filter(|c| c.is_finite() && *c >= 0.0)
        .map(|c| c.round().min(u32::MAX as f64) as u32))
}

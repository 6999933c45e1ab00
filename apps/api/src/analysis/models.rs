use serde::{Serialize, Serializer};

/// Keyword lists never grow past this many entries.
pub const MAX_KEYWORDS: usize = 15;

/// What kind of span a keyword represents.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordType {
    /// Named entity; carries the extractor's most specific class label when it gave one.
    Entity(Option<String>),
    Topic,
    Phrase,
    Word,
    Keyword,
}

impl KeywordType {
    pub fn as_str(&self) -> &str {
        match self {
            KeywordType::Entity(Some(class)) => class,
            KeywordType::Entity(None) => "Entity",
            KeywordType::Topic => "Topic",
            KeywordType::Phrase => "Phrase",
            KeywordType::Word => "Word",
            KeywordType::Keyword => "Keyword",
        }
    }
}

impl Serialize for KeywordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A scored text span. `text` is the de-duplication key within a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub text: String,
    /// 0.0 – 1.0
    pub score: f64,
    #[serde(rename = "type")]
    pub kind: KeywordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub readability_score: u8, // 0 – 100
    pub keyword_density: String,
    pub content_length: usize,
    pub avg_sentence_length: String,
}

/// Response body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub keywords: Vec<Keyword>,
    pub metrics: Metrics,
}

/// Which extraction tier produced the final keyword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordSource {
    Normalized,
    Fallback,
    MinimalSynthesis,
}

impl KeywordSource {
    pub fn as_str(self) -> &'static str {
        match self {
            KeywordSource::Normalized => "normalized",
            KeywordSource::Fallback => "fallback",
            KeywordSource::MinimalSynthesis => "minimal_synthesis",
        }
    }
}

/// Sorts non-increasing by score (stable, so equal scores keep insertion order)
/// and truncates to `MAX_KEYWORDS`.
pub fn rank_and_truncate(keywords: &mut Vec<Keyword>) {
    keywords.sort_by(|a, b| b.score.total_cmp(&a.score));
    keywords.truncate(MAX_KEYWORDS);
}

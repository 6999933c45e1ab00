//! Local extraction tiers used when the external extractor has nothing to offer.
//!
//! `extract_keywords` ranks single words and adjacent word pairs by raw frequency.
//! `synthesize_minimal` is the last resort: the first few distinct long tokens,
//! as written in the text.

use std::collections::{HashMap, HashSet};

use crate::analysis::models::{rank_and_truncate, Keyword, KeywordType};

const STOP_WORDS: [&str; 11] = [
    "the", "and", "a", "an", "in", "on", "at", "to", "for", "of", "with",
];

/// Cleaned tokens must be strictly longer than this to count.
const MIN_TOKEN_LEN: usize = 3;
const TOP_WORDS: usize = 10;
const TOP_PHRASES: usize = 5;

/// Raw tokens must be strictly longer than this for the minimal tier, counted in
/// `char`s, not bytes. Astral-plane characters count once here (UTF-16 would count two).
const MINIMAL_TOKEN_LEN: usize = 4;
const MINIMAL_MAX: usize = 5;

/// Occurrence counts that remember first-appearance order, so equal counts rank stably.
#[derive(Default)]
struct FrequencyTable {
    counts: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    fn add(&mut self, term: String) {
        match self.index.get(&term) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(term.clone(), self.counts.len());
                self.counts.push((term, 1));
            }
        }
    }

    /// Top `n` terms by descending count; ties keep first-appearance order.
    fn top(mut self, n: usize) -> Vec<(String, u32)> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts.truncate(n);
        self.counts
    }
}

/// Lowercases and strips everything but ASCII word characters.
fn clean_token(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn is_candidate(word: &str) -> bool {
    word.len() > MIN_TOKEN_LEN && !STOP_WORDS.contains(&word)
}

/// Frequency-ranked words (top 10) and adjacent word pairs (top 5), merged,
/// sorted by score and capped at 15. Empty when no token qualifies.
pub fn extract_keywords(text: &str) -> Vec<Keyword> {
    let cleaned: Vec<String> = text.split_whitespace().map(clean_token).collect();

    let mut words = FrequencyTable::default();
    for word in cleaned.iter().filter(|w| is_candidate(w)) {
        words.add(word.clone());
    }

    let mut phrases = FrequencyTable::default();
    for pair in cleaned.windows(2) {
        if is_candidate(&pair[0]) && is_candidate(&pair[1]) {
            phrases.add(format!("{} {}", pair[0], pair[1]));
        }
    }

    let mut keywords: Vec<Keyword> = words
        .top(TOP_WORDS)
        .into_iter()
        .enumerate()
        .map(|(idx, (text, count))| Keyword {
            text,
            score: (1.0 - idx as f64 * 0.05).max(0.5),
            kind: KeywordType::Keyword,
            frequency: Some(count),
        })
        .collect();

    keywords.extend(
        phrases
            .top(TOP_PHRASES)
            .into_iter()
            .enumerate()
            .map(|(idx, (text, count))| Keyword {
                text,
                score: (0.95 - idx as f64 * 0.05).max(0.6),
                kind: KeywordType::Phrase,
                frequency: Some(count),
            }),
    );

    rank_and_truncate(&mut keywords);
    keywords
}

/// Last-resort tier: up to 5 distinct raw tokens longer than 4 characters, in order
/// of first appearance. When the text has no such token, tokens of any length are
/// used instead, so non-blank text always yields at least one keyword.
pub fn synthesize_minimal(text: &str) -> Vec<Keyword> {
    let long = distinct_tokens(text, |t| t.chars().count() > MINIMAL_TOKEN_LEN);
    let picked = if long.is_empty() {
        distinct_tokens(text, |_| true)
    } else {
        long
    };

    picked
        .into_iter()
        .enumerate()
        .map(|(idx, token)| Keyword {
            text: token.to_string(),
            score: 0.9 - idx as f64 * 0.1,
            kind: KeywordType::Word,
            frequency: None,
        })
        .collect()
}

fn distinct_tokens(text: &str, keep: impl Fn(&str) -> bool) -> Vec<&str> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .filter(|t| keep(*t))
        .filter(|t| seen.insert(*t))
        .take(MINIMAL_MAX)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(keywords: &[Keyword]) -> Vec<&str> {
        keywords.iter().map(|k| k.text.as_str()).collect()
    }

    #[test]
    fn test_clean_token_strips_punctuation_and_lowercases() {
        assert_eq!(clean_token("Rust's"), "rusts");
        assert_eq!(clean_token("(Tokio)!"), "tokio");
        assert_eq!(clean_token("snake_case"), "snake_case");
        assert_eq!(clean_token("café"), "caf");
        assert_eq!(clean_token("..."), "");
    }

    #[test]
    fn test_short_and_stop_words_are_dropped() {
        let keywords = extract_keywords("The cat sat with a dog and ate food");
        // only "food" is longer than three characters and not a stop word
        assert_eq!(texts(&keywords), vec!["food"]);
        assert_eq!(keywords[0].frequency, Some(1));
        assert_eq!(keywords[0].kind, KeywordType::Keyword);
    }

    #[test]
    fn test_words_ranked_by_frequency_then_first_appearance() {
        let keywords = extract_keywords("alpha beta. gamma beta, delta gamma beta");
        let words: Vec<&Keyword> = keywords
            .iter()
            .filter(|k| k.kind == KeywordType::Keyword)
            .collect();

        assert_eq!(words[0].text, "beta");
        assert_eq!(words[0].frequency, Some(3));
        assert!((words[0].score - 1.0).abs() < 1e-9);
        assert_eq!(words[1].text, "gamma");
        assert_eq!(words[2].text, "alpha");
        assert_eq!(words[3].text, "delta");
        assert!((words[3].score - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_word_scores_floor_at_half() {
        let text = (0..12)
            .map(|i| format!("word{i:02}"))
            .collect::<Vec<_>>()
            .join(". ");
        let keywords = extract_keywords(&text);
        let words: Vec<&Keyword> = keywords
            .iter()
            .filter(|k| k.kind == KeywordType::Keyword)
            .collect();

        assert_eq!(words.len(), TOP_WORDS);
        assert!((words[9].score - 0.55).abs() < 1e-9);
        assert!(words.iter().all(|k| k.score >= 0.5));
    }

    #[test]
    fn test_phrases_from_adjacent_qualifying_words() {
        let keywords = extract_keywords("memory safety matters. Memory safety, always! with memory");
        let phrases: Vec<&Keyword> = keywords
            .iter()
            .filter(|k| k.kind == KeywordType::Phrase)
            .collect();

        assert_eq!(phrases[0].text, "memory safety");
        assert_eq!(phrases[0].frequency, Some(2));
        assert!((phrases[0].score - 0.95).abs() < 1e-9);
        // "with" is a stop word, so "always with" and "with memory" never form
        assert!(phrases.iter().all(|p| !p.text.contains("with")));
    }

    #[test]
    fn test_merged_list_sorted_and_capped() {
        let text = (0..30)
            .map(|i| format!("token{i:02} token{:02}", i + 1))
            .collect::<Vec<_>>()
            .join(" ");
        let keywords = extract_keywords(&text);

        assert_eq!(keywords.len(), 15);
        assert!(keywords.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_no_qualifying_tokens_yields_empty() {
        assert!(extract_keywords("a an in on at").is_empty());
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let text = "Rust ownership rules keep memory safe. Ownership rules are checked at compile time.";
        assert_eq!(extract_keywords(text), extract_keywords(text));
    }

    #[test]
    fn test_minimal_takes_distinct_long_tokens_in_order() {
        let keywords = synthesize_minimal("Hello hello world Hello there, planet! again zebra");
        assert_eq!(
            texts(&keywords),
            vec!["Hello", "hello", "world", "there,", "planet!"]
        );
        assert!((keywords[0].score - 0.9).abs() < 1e-9);
        assert!((keywords[4].score - 0.5).abs() < 1e-9);
        assert!(keywords.iter().all(|k| k.kind == KeywordType::Word));
        assert!(keywords.iter().all(|k| k.frequency.is_none()));
    }

    #[test]
    fn test_minimal_relaxes_length_when_no_long_tokens() {
        let keywords = synthesize_minimal("a an in on at an");
        assert_eq!(texts(&keywords), vec!["a", "an", "in", "on", "at"]);
    }

    #[test]
    fn test_minimal_length_counts_chars_not_bytes() {
        // "café" is 5 bytes but 4 chars; "naïve" is 5 chars
        let keywords = synthesize_minimal("café naïve café");
        assert_eq!(texts(&keywords), vec!["naïve"]);
    }

    #[test]
    fn test_minimal_on_blank_text_is_empty() {
        assert!(synthesize_minimal("   \n\t").is_empty());
    }
}

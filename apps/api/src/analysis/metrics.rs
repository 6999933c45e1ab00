//! Metrics Calculator — readability, keyword density and length statistics for a text.
//!
//! Readability is Flesch Reading Ease over whitespace tokens and `.`/`!`/`?`
//! sentence segments, with syllables estimated per word by a vowel-group heuristic.

use regex::Regex;

use crate::analysis::models::{Keyword, Metrics};

const FLESCH_BASE: f64 = 206.835;
const FLESCH_SENTENCE_WEIGHT: f64 = 1.015;
const FLESCH_SYLLABLE_WEIGHT: f64 = 84.6;

/// Computes metrics for `text` given the final keyword list (sorted, best first).
/// An empty keyword list gives a density of `0.0`.
///
/// Fails only if the density matcher for the top keyword cannot be compiled.
pub fn calculate_metrics(text: &str, keywords: &[Keyword]) -> Result<Metrics, regex::Error> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let content_length = words.len();
    // Clamped divisor; `content_length` reports the real count.
    let word_count = content_length.max(1) as f64;

    let sentence_count = text
        .split(['.', '!', '?'])
        .filter(|segment| !segment.is_empty())
        .count()
        .max(1) as f64;

    let avg_words_per_sentence = word_count / sentence_count;

    let total_syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let avg_syllables_per_word = total_syllables as f64 / word_count;

    let raw_readability = FLESCH_BASE
        - FLESCH_SENTENCE_WEIGHT * avg_words_per_sentence
        - FLESCH_SYLLABLE_WEIGHT * avg_syllables_per_word;
    let readability_score = raw_readability.clamp(0.0, 100.0).round() as u8;

    let keyword_density = match keywords.first() {
        Some(top) => {
            let occurrences = match top.frequency {
                Some(f) => f as usize,
                None => count_occurrences(text, &top.text)?,
            };
            occurrences as f64 / word_count * 100.0
        }
        None => 0.0,
    };

    Ok(Metrics {
        readability_score,
        keyword_density: one_decimal(keyword_density),
        content_length,
        avg_sentence_length: one_decimal(avg_words_per_sentence),
    })
}

/// One fractional digit, ties rounded away from zero (`2.25` -> `"2.3"`).
fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Case-insensitive whole-word matches of `keyword` in `text`; the keyword's
/// tokens may be separated by any run of whitespace.
fn count_occurrences(text: &str, keyword: &str) -> Result<usize, regex::Error> {
    let tokens: Vec<String> = keyword.split_whitespace().map(regex::escape).collect();
    if tokens.is_empty() {
        return Ok(0);
    }
    let pattern = format!(r"(?i)\b{}\b", tokens.join(r"\s+"));
    let re = Regex::new(&pattern)?;
    Ok(re.find_iter(text).count())
}

/// Heuristic syllable count for a single word. Non-letters are ignored;
/// a word with no letters has 0 syllables, any other word at least 1.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let mut count: i64 = 0;
    let mut in_vowel_run = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !in_vowel_run {
            count += 1;
        }
        in_vowel_run = vowel;
    }

    if has_silent_ending(&letters) {
        count -= 1;
    }
    if is_consonants_then_y(&letters) {
        count -= 1;
    }

    count.max(1) as usize
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// `-ed`, or `-e`/`-es` after a consonant other than `l` (`cake`, `makes`, but not `table`).
fn has_silent_ending(letters: &[char]) -> bool {
    let consonant_not_l = |c: char| !is_vowel(c) && c != 'l';
    match letters {
        [.., 'e', 'd'] => true,
        [.., c, 'e', 's'] => consonant_not_l(*c),
        [.., c, 'e'] => consonant_not_l(*c),
        _ => false,
    }
}

/// Only consonants followed by a final `y`, e.g. `my`, `dry`, `shy`.
fn is_consonants_then_y(letters: &[char]) -> bool {
    match letters.split_last() {
        Some((&'y', rest)) => rest.iter().all(|&c| !is_vowel(c)),
        _ => false,
    }
}

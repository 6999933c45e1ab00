//! Keyword Normalizer — turns a raw extraction result into a ranked, de-duplicated keyword list.
//!
//! Algorithm:
//! 1. Entities with relevance > 0.5 and non-empty matched text → keyed by `entityId`.
//! 2. Topics with score > 0.5 → keyed by `label`.
//! 3. Fewer than 10 so far → multi-word phrases with relevance > 0.2, up to 15 total.
//! 4. Sort descending by score, keep the first 15.

use std::collections::HashSet;

use crate::analysis::models::{rank_and_truncate, Keyword, KeywordType, MAX_KEYWORDS};
use crate::textrazor::models::{Entity, Phrase, Topic};
use crate::textrazor::ExtractionResult;

const ENTITY_MIN_RELEVANCE: f64 = 0.5;
const TOPIC_MIN_SCORE: f64 = 0.5;
const PHRASE_MIN_RELEVANCE: f64 = 0.2;
/// Phrases are only consulted while the list is shorter than this.
const PHRASE_TOP_UP_BELOW: usize = 10;

/// Returns an empty list when nothing qualifies; the orchestrator decides what to do then.
pub fn normalize(extraction: &ExtractionResult) -> Vec<Keyword> {
    let mut keywords = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for entity in extraction.entities.iter().filter(|e| qualifies_entity(e)) {
        if seen.insert(entity.entity_id.clone()) {
            keywords.push(Keyword {
                text: entity.entity_id.clone(),
                score: entity.relevance_score,
                kind: KeywordType::Entity(entity.types.first().cloned()),
                frequency: Some(entity.frequency.filter(|&f| f > 0).unwrap_or(1)),
            });
        }
    }

    for topic in extraction.topics.iter().filter(|t| qualifies_topic(t)) {
        if seen.insert(topic.label.clone()) {
            keywords.push(Keyword {
                text: topic.label.clone(),
                score: topic.score,
                kind: KeywordType::Topic,
                frequency: Some(topic.frequency.filter(|&f| f > 0).unwrap_or(1)),
            });
        }
    }

    if keywords.len() < PHRASE_TOP_UP_BELOW {
        // The window is taken before de-duplication, so duplicates still consume a slot.
        let window = MAX_KEYWORDS - keywords.len();
        for phrase in extraction
            .phrases
            .iter()
            .filter(|p| qualifies_phrase(p))
            .take(window)
        {
            let text = phrase_text(phrase);
            if seen.insert(text.clone()) {
                keywords.push(Keyword {
                    text,
                    score: phrase.relevance_score,
                    kind: KeywordType::Phrase,
                    frequency: Some(1),
                });
            }
        }
    }

    rank_and_truncate(&mut keywords);
    keywords
}

fn qualifies_entity(entity: &Entity) -> bool {
    entity.relevance_score > ENTITY_MIN_RELEVANCE
        && entity.matched_text.as_deref().is_some_and(|m| !m.is_empty())
}

fn qualifies_topic(topic: &Topic) -> bool {
    topic.score > TOPIC_MIN_SCORE
}

fn qualifies_phrase(phrase: &Phrase) -> bool {
    phrase.relevance_score > PHRASE_MIN_RELEVANCE && phrase.words.len() > 1
}

fn phrase_text(phrase: &Phrase) -> String {
    phrase
        .words
        .iter()
        .map(|w| w.token.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

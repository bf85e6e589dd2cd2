//! Training corpus data structures
//!
//! This module defines the learned state of a speaker model:
//! - `TrainingCorpus`: raw messages, word successors and cached phrases
//! - `CorpusLimits`: capacity and phrase-length bounds applied on ingest

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Maximum number of raw messages retained
pub const MAX_STORED_MESSAGES: usize = 1000;

/// Maximum number of cached common phrases
pub const MAX_COMMON_PHRASES: usize = 100;

/// Fewest tokens a message needs to become a common phrase
pub const MIN_PHRASE_WORDS: usize = 3;

/// Most tokens a message may have to become a common phrase
pub const MAX_PHRASE_WORDS: usize = 10;

/// Capacity and phrase bounds for a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusLimits {
    /// Retained raw messages (oldest evicted first)
    pub max_messages: usize,
    /// Retained common phrases (oldest evicted first)
    pub max_common_phrases: usize,
    /// Inclusive lower token bound for phrase capture
    pub min_phrase_words: usize,
    /// Inclusive upper token bound for phrase capture
    pub max_phrase_words: usize,
}

impl Default for CorpusLimits {
    fn default() -> Self {
        Self {
            max_messages: MAX_STORED_MESSAGES,
            max_common_phrases: MAX_COMMON_PHRASES,
            min_phrase_words: MIN_PHRASE_WORDS,
            max_phrase_words: MAX_PHRASE_WORDS,
        }
    }
}

impl CorpusLimits {
    /// Whether a message with `word_count` tokens qualifies as a phrase
    pub fn is_phrase_length(&self, word_count: usize) -> bool {
        (self.min_phrase_words..=self.max_phrase_words).contains(&word_count)
    }
}

/// Everything learned about one speaker
///
/// Serialized as-is to the model file. Missing fields load as empty so
/// partially written or hand-edited files still open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingCorpus {
    /// Raw messages, most recently learned last
    #[serde(default)]
    pub messages: VecDeque<String>,
    /// Lowercased word -> words observed immediately after it, in
    /// first-seen key order
    #[serde(default)]
    pub word_pairs: IndexMap<String, Vec<String>>,
    /// Distinct short messages in first-learned order
    #[serde(default)]
    pub common_phrases: VecDeque<String>,
}

impl TrainingCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one message. Returns false if the message was blank.
    pub fn ingest(&mut self, message: &str, limits: &CorpusLimits) -> bool {
        if message.trim().is_empty() {
            return false;
        }

        self.messages.push_back(message.to_string());
        truncate_front(&mut self.messages, limits.max_messages);

        let words = tokenize(message);
        for pair in words.windows(2) {
            self.word_pairs
                .entry(pair[0].to_lowercase())
                .or_default()
                .push(pair[1].to_string());
        }

        // Phrase membership is exact and case-sensitive, unlike the pair keys
        if limits.is_phrase_length(words.len())
            && !self.common_phrases.iter().any(|p| p == message)
        {
            self.common_phrases.push_back(message.to_string());
            truncate_front(&mut self.common_phrases, limits.max_common_phrases);
        }

        true
    }

    /// Drop the oldest entries of an over-capacity corpus.
    /// Returns true if anything was removed.
    pub fn enforce_limits(&mut self, limits: &CorpusLimits) -> bool {
        let before = (self.messages.len(), self.common_phrases.len());
        truncate_front(&mut self.messages, limits.max_messages);
        truncate_front(&mut self.common_phrases, limits.max_common_phrases);
        before != (self.messages.len(), self.common_phrases.len())
    }

    /// Successors recorded for `word` (looked up lowercased)
    pub fn successors(&self, word: &str) -> Option<&[String]> {
        self.word_pairs
            .get(&word.to_lowercase())
            .map(|v| v.as_slice())
    }

    /// Whether the model holds enough raw messages for generation
    pub fn has_at_least(&self, count: usize) -> bool {
        self.messages.len() >= count
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.word_pairs.is_empty() && self.common_phrases.is_empty()
    }
}

/// Split on runs of whitespace
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

fn truncate_front<T>(items: &mut VecDeque<T>, capacity: usize) {
    while items.len() > capacity {
        items.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingest_all(corpus: &mut TrainingCorpus, messages: &[&str]) {
        let limits = CorpusLimits::default();
        for m in messages {
            corpus.ingest(m, &limits);
        }
    }

    #[test]
    fn test_blank_messages_ignored() {
        let mut corpus = TrainingCorpus::new();
        let limits = CorpusLimits::default();

        assert!(!corpus.ingest("", &limits));
        assert!(!corpus.ingest("   \t\n ", &limits));
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_word_pairs_extracted() {
        let mut corpus = TrainingCorpus::new();
        ingest_all(&mut corpus, &["Alpha Beta gamma"]);

        assert_eq!(corpus.word_pairs["alpha"], vec!["Beta".to_string()]);
        assert_eq!(corpus.word_pairs["beta"], vec!["gamma".to_string()]);
        assert!(!corpus.word_pairs.contains_key("gamma"));
        assert!(corpus.word_pairs.keys().all(|k| *k == k.to_lowercase()));
    }

    #[test]
    fn test_successors_accumulate_duplicates() {
        let mut corpus = TrainingCorpus::new();
        ingest_all(&mut corpus, &["the cat", "The cat", "THE dog"]);

        assert_eq!(
            corpus.successors("tHe").unwrap(),
            &["cat".to_string(), "cat".to_string(), "dog".to_string()]
        );
    }

    #[test]
    fn test_whitespace_runs_split() {
        let mut corpus = TrainingCorpus::new();
        ingest_all(&mut corpus, &["  one \t two\n\nthree  "]);

        assert_eq!(corpus.word_pairs["one"], vec!["two".to_string()]);
        assert_eq!(corpus.word_pairs["two"], vec!["three".to_string()]);
        // Stored verbatim
        assert_eq!(corpus.messages[0], "  one \t two\n\nthree  ");
    }

    #[test]
    fn test_two_token_message() {
        let mut corpus = TrainingCorpus::new();
        ingest_all(&mut corpus, &["hello there"]);

        let pair_count: usize = corpus.word_pairs.values().map(|v| v.len()).sum();
        assert_eq!(pair_count, 1);
        assert!(corpus.common_phrases.is_empty());
    }

    #[test]
    fn test_eleven_token_message() {
        let mut corpus = TrainingCorpus::new();
        ingest_all(&mut corpus, &["a1 a2 a3 a4 a5 a6 a7 a8 a9 a10 a11"]);

        let pair_count: usize = corpus.word_pairs.values().map(|v| v.len()).sum();
        assert_eq!(pair_count, 10);
        assert!(corpus.common_phrases.is_empty());
    }

    #[test]
    fn test_phrase_bounds_inclusive() {
        let mut corpus = TrainingCorpus::new();
        ingest_all(
            &mut corpus,
            &["one two three", "w1 w2 w3 w4 w5 w6 w7 w8 w9 w10"],
        );

        assert_eq!(corpus.common_phrases.len(), 2);
    }

    #[test]
    fn test_phrase_dedup_is_case_sensitive() {
        let mut corpus = TrainingCorpus::new();
        ingest_all(
            &mut corpus,
            &["see you later", "see you later", "See you later"],
        );

        assert_eq!(corpus.messages.len(), 3);
        assert_eq!(corpus.common_phrases.len(), 2);
        assert_eq!(corpus.word_pairs["see"].len(), 3);
    }

    #[test]
    fn test_message_cap_keeps_most_recent() {
        let mut corpus = TrainingCorpus::new();
        let limits = CorpusLimits::default();

        for i in 0..1100 {
            corpus.ingest(&format!("Test message number {}", i), &limits);
            assert!(corpus.messages.len() <= MAX_STORED_MESSAGES);
            assert!(corpus.common_phrases.len() <= MAX_COMMON_PHRASES);
        }

        assert_eq!(corpus.messages.len(), 1000);
        assert_eq!(corpus.messages.front().unwrap(), "Test message number 100");
        assert_eq!(corpus.messages.back().unwrap(), "Test message number 1099");
        for (offset, message) in corpus.messages.iter().enumerate() {
            assert_eq!(*message, format!("Test message number {}", offset + 100));
        }
    }

    #[test]
    fn test_phrase_cap_evicts_oldest() {
        let mut corpus = TrainingCorpus::new();
        let limits = CorpusLimits::default();

        for i in 0..150 {
            corpus.ingest(&format!("phrase number {}", i), &limits);
        }

        assert_eq!(corpus.common_phrases.len(), 100);
        assert_eq!(corpus.common_phrases.front().unwrap(), "phrase number 50");

        let mut seen = std::collections::HashSet::new();
        assert!(corpus.common_phrases.iter().all(|p| seen.insert(p)));
    }

    #[test]
    fn test_enforce_limits() {
        let mut corpus = TrainingCorpus::new();
        corpus.messages = (0..20).map(|i| i.to_string()).collect();
        corpus.common_phrases = (0..5).map(|i| i.to_string()).collect();

        let limits = CorpusLimits {
            max_messages: 10,
            max_common_phrases: 5,
            ..Default::default()
        };

        assert!(corpus.enforce_limits(&limits));
        assert_eq!(corpus.messages.len(), 10);
        assert_eq!(corpus.messages[0], "10");
        assert!(!corpus.enforce_limits(&limits));
    }

    #[test]
    fn test_missing_fields_deserialize_empty() {
        let corpus: TrainingCorpus = serde_json::from_str(r#"{"messages": ["hi"]}"#).unwrap();
        assert_eq!(corpus.messages.len(), 1);
        assert!(corpus.word_pairs.is_empty());
        assert!(corpus.common_phrases.is_empty());
    }
}

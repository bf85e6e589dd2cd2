//! Model store
//!
//! Owns the training corpus and its backing JSON file. Every learning call
//! is persisted synchronously; load and save failures are logged and never
//! propagated, so a bad or unwritable file degrades to an in-memory model.

use crate::model::corpus::{CorpusLimits, TrainingCorpus};
use crate::model::error::ModelResult;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The in-memory model plus the file it is persisted to
#[derive(Debug)]
pub struct ModelStore {
    /// Backing file
    path: PathBuf,
    /// Capacity bounds applied on ingest and load
    limits: CorpusLimits,
    /// Learned state
    corpus: TrainingCorpus,
}

impl ModelStore {
    /// Open a store with the default limits
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_limits(path, CorpusLimits::default())
    }

    /// Open a store, loading any previously persisted corpus.
    ///
    /// Never fails: a missing file starts empty, an unreadable or malformed
    /// one is logged and also starts empty.
    pub fn with_limits(path: impl Into<PathBuf>, limits: CorpusLimits) -> Self {
        let path = path.into();

        let mut corpus = match Self::try_load(&path) {
            Ok(Some(corpus)) => {
                tracing::info!(
                    "Loaded {} messages from training data {:?}",
                    corpus.messages.len(),
                    path
                );
                corpus
            }
            Ok(None) => {
                tracing::debug!("No training data at {:?}, starting empty", path);
                TrainingCorpus::new()
            }
            Err(e) => {
                tracing::error!("Error loading training data from {:?}: {}", path, e);
                TrainingCorpus::new()
            }
        };

        if corpus.enforce_limits(&limits) {
            tracing::warn!(
                "Training data {:?} exceeded configured limits, oldest entries dropped",
                path
            );
        }

        Self {
            path,
            limits,
            corpus,
        }
    }

    /// Read a corpus from disk. `Ok(None)` if the file does not exist.
    pub fn try_load(path: &Path) -> ModelResult<Option<TrainingCorpus>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let corpus: TrainingCorpus = serde_json::from_str(&content)?;
        Ok(Some(corpus))
    }

    /// Write the full corpus to the backing file, overwriting it
    pub fn persist(&self) -> ModelResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.corpus)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Learn one message and persist.
    ///
    /// Returns false for blank input, which is ignored without touching disk.
    pub fn learn(&mut self, message: &str) -> bool {
        if !self.corpus.ingest(message, &self.limits) {
            return false;
        }

        tracing::debug!(
            "Learned message ({} chars), {} messages stored",
            message.len(),
            self.corpus.messages.len()
        );

        self.persist_or_log();
        true
    }

    /// Learn many messages, persisting once at the end.
    ///
    /// Returns the number of messages accepted.
    pub fn learn_batch<I, S>(&mut self, messages: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted = messages
            .into_iter()
            .filter(|m| self.corpus.ingest(m.as_ref(), &self.limits))
            .count();

        if accepted > 0 {
            tracing::debug!("Learned batch of {} messages", accepted);
            self.persist_or_log();
        }

        accepted
    }

    fn persist_or_log(&self) {
        if let Err(e) = self.persist() {
            tracing::error!("Error saving training data to {:?}: {}", self.path, e);
        }
    }

    /// Current counters
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            total_messages: self.corpus.messages.len(),
            unique_word_pairs: self.corpus.word_pairs.len(),
            common_phrase_count: self.corpus.common_phrases.len(),
        }
    }

    pub fn corpus(&self) -> &TrainingCorpus {
        &self.corpus
    }

    pub fn limits(&self) -> &CorpusLimits {
        &self.limits
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Model statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub total_messages: usize,
    /// Distinct lowercased words with at least one successor
    pub unique_word_pairs: usize,
    pub common_phrase_count: usize,
}

impl std::fmt::Display for ModelStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Messages: {}, Word pairs: {}, Common phrases: {}",
            self.total_messages, self.unique_word_pairs, self.common_phrase_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_test_store() -> (ModelStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = ModelStore::open(dir.path().join("model.json"));
        (store, dir)
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.stats(), ModelStats::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let store = ModelStore::open(&path);
        assert_eq!(store.stats().total_messages, 0);
        assert!(ModelStore::try_load(&path).is_err());
    }

    #[test]
    fn test_wrong_shape_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, r#"{"messages": 42}"#).unwrap();

        let store = ModelStore::open(&path);
        assert_eq!(store.stats().total_messages, 0);
    }

    #[test]
    fn test_learn_persists() {
        let (mut store, _dir) = create_test_store();

        assert!(store.learn("persist me right now"));
        assert!(store.path().exists());

        let on_disk = ModelStore::try_load(store.path()).unwrap().unwrap();
        assert_eq!(&on_disk, store.corpus());
    }

    #[test]
    fn test_blank_learn_does_not_write() {
        let (mut store, _dir) = create_test_store();

        assert!(!store.learn("   "));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_format_fields() {
        let (mut store, _dir) = create_test_store();
        store.learn("Hello big world");

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["messages"][0], "Hello big world");
        assert_eq!(value["word_pairs"]["hello"][0], "big");
        assert_eq!(value["common_phrases"][0], "Hello big world");
    }

    #[test]
    fn test_reload_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");

        let first_stats;
        let first_corpus;
        {
            let mut store = ModelStore::open(&path);
            store.learn("Zebra crossing ahead");
            store.learn("apple pie is great");
            store.learn("Zebra stripes everywhere today");
            first_stats = store.stats();
            first_corpus = store.corpus().clone();
        }

        let store = ModelStore::open(&path);
        assert_eq!(store.stats(), first_stats);
        assert_eq!(store.corpus(), &first_corpus);

        // Saving again produces byte-identical output
        let before = std::fs::read_to_string(&path).unwrap();
        store.persist().unwrap();
        let after = std::fs::read_to_string(&path).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_unsorted_keys_survive_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");

        let original = r#"{
  "messages": [
    "zeta a",
    "alpha b"
  ],
  "word_pairs": {
    "zeta": [
      "a"
    ],
    "alpha": [
      "b"
    ]
  },
  "common_phrases": []
}"#;
        std::fs::write(&path, original).unwrap();

        let store = ModelStore::open(&path);
        store.persist().unwrap();

        let after = std::fs::read_to_string(&path).unwrap();
        assert_eq!(after, original);
    }

    #[test]
    fn test_new_keys_append_in_first_seen_order() {
        let (mut store, _dir) = create_test_store();
        store.learn("zulu yankee xray");
        store.learn("alpha zulu bravo");

        let keys: Vec<&String> = store.corpus().word_pairs.keys().collect();
        assert_eq!(keys, vec!["zulu", "yankee", "alpha"]);

        let reloaded = ModelStore::open(store.path());
        let reloaded_keys: Vec<&String> = reloaded.corpus().word_pairs.keys().collect();
        assert_eq!(reloaded_keys, keys);
    }

    #[test]
    fn test_learn_batch_persists_once() {
        let (mut store, _dir) = create_test_store();

        let accepted = store.learn_batch(["first one here", "", "second one here", "  "]);
        assert_eq!(accepted, 2);

        let on_disk = ModelStore::try_load(store.path()).unwrap().unwrap();
        assert_eq!(on_disk.messages.len(), 2);
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let dir = tempdir().unwrap();
        // Parent is a regular file, so the write cannot succeed
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let mut store = ModelStore::open(blocker.join("model.json"));
        assert!(store.learn("still learned in memory"));
        assert_eq!(store.stats().total_messages, 1);
        assert!(store.persist().is_err());
    }

    #[test]
    fn test_oversized_file_trimmed_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");

        let mut corpus = TrainingCorpus::new();
        corpus.messages = (0..30).map(|i| format!("m{}", i)).collect();
        std::fs::write(&path, serde_json::to_string(&corpus).unwrap()).unwrap();

        let limits = CorpusLimits {
            max_messages: 10,
            ..Default::default()
        };
        let store = ModelStore::with_limits(&path, limits);

        assert_eq!(store.stats().total_messages, 10);
        assert_eq!(store.corpus().messages[0], "m20");
    }

    #[test]
    fn test_stats_display() {
        let stats = ModelStats {
            total_messages: 10,
            unique_word_pairs: 42,
            common_phrase_count: 7,
        };
        assert_eq!(
            stats.to_string(),
            "Messages: 10, Word pairs: 42, Common phrases: 7"
        );
    }
}

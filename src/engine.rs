//! Mimic Engine
//!
//! Composes the model store and the response generator behind the public
//! operations used by chat glue:
//! - `learn_from_message`: ingest + persist
//! - `generate_response`: strategy cascade over the current corpus
//! - `get_stats`: counters
//!
//! Single-threaded by construction: every operation that mutates the corpus
//! or draws randomness takes `&mut self`.

use crate::config::Config;
use crate::generator::{GeneratorConfig, Response, ResponseGenerator};
use crate::model::{CorpusLimits, ModelStats, ModelStore, TrainingCorpus};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

/// The learning and generation engine for one speaker
pub struct MimicEngine {
    /// Corpus plus backing file
    store: ModelStore,
    /// Strategy cascade
    generator: ResponseGenerator,
    /// Randomness for every generation draw
    rng: StdRng,
}

impl MimicEngine {
    /// Open an engine on `path` with default limits and generator settings
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_parts(ModelStore::open(path), ResponseGenerator::default())
    }

    /// Open an engine from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::with_settings(
            &config.model.data_file,
            config.model.limits(),
            config.generator.clone(),
        )
    }

    /// Open an engine with explicit limits and generator settings
    pub fn with_settings(
        path: impl Into<PathBuf>,
        limits: CorpusLimits,
        generator: GeneratorConfig,
    ) -> Self {
        Self::with_parts(
            ModelStore::with_limits(path, limits),
            ResponseGenerator::new(generator),
        )
    }

    fn with_parts(store: ModelStore, generator: ResponseGenerator) -> Self {
        Self {
            store,
            generator,
            rng: StdRng::from_entropy(),
        }
    }

    /// Builder method: reseed the random source for reproducible output
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Learn one message. Blank input is ignored; persistence failures are
    /// logged and do not undo the in-memory update.
    pub fn learn_from_message(&mut self, message: &str) {
        self.store.learn(message);
    }

    /// Learn many messages with a single write at the end.
    /// Returns the number accepted.
    pub fn learn_batch<I, S>(&mut self, messages: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.store.learn_batch(messages)
    }

    /// Generate text in the learned style. An empty trigger means none.
    pub fn generate_response(&mut self, trigger: &str) -> String {
        self.generate_detailed(trigger).text
    }

    /// Generate text and report which strategy produced it
    pub fn generate_detailed(&mut self, trigger: &str) -> Response {
        self.generator.generate(self.store.corpus(), trigger, &mut self.rng)
    }

    pub fn get_stats(&self) -> ModelStats {
        self.store.stats()
    }

    pub fn corpus(&self) -> &TrainingCorpus {
        self.store.corpus()
    }

    pub fn generator(&self) -> &ResponseGenerator {
        &self.generator
    }

    /// Get the backing file path
    pub fn data_file(&self) -> &Path {
        self.store.path()
    }
}

//! Response generator
//!
//! Produces text from a corpus through an ordered strategy table:
//!
//! ```text
//!   < min_messages?  → placeholder
//!   phrase recall    (p = 0.5, needs common phrases)
//!   chain walk       (p = 0.7, needs word pairs, fails if too short)
//!   verbatim recall  (p = 1.0, needs messages)
//! ```
//!
//! Each row draws its own coin; the first row that is available, fires and
//! succeeds produces the response.

use crate::generator::strategy::{Strategy, StrategyEntry};
use crate::model::TrainingCorpus;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Response returned while the model has too little data
pub const STILL_LEARNING: &str = "I'm still learning... give me some time!";

/// Tunables for the generator
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratorConfig {
    /// Messages required before any strategy runs
    #[serde(default = "default_min_messages")]
    pub min_messages: usize,

    #[serde(default = "default_phrase_chance")]
    pub phrase_chance: f64,

    #[serde(default = "default_chain_chance")]
    pub chain_chance: f64,

    #[serde(default = "default_min_walk_steps")]
    pub min_walk_steps: usize,

    #[serde(default = "default_max_walk_steps")]
    pub max_walk_steps: usize,

    /// A chain response must be strictly longer than this many characters
    #[serde(default = "default_min_response_length")]
    pub min_response_length: usize,

    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_min_messages() -> usize {
    5
}

fn default_phrase_chance() -> f64 {
    0.5
}

fn default_chain_chance() -> f64 {
    0.7
}

fn default_min_walk_steps() -> usize {
    3
}

fn default_max_walk_steps() -> usize {
    15
}

fn default_min_response_length() -> usize {
    10
}

fn default_placeholder() -> String {
    STILL_LEARNING.to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_messages: default_min_messages(),
            phrase_chance: default_phrase_chance(),
            chain_chance: default_chain_chance(),
            min_walk_steps: default_min_walk_steps(),
            max_walk_steps: default_max_walk_steps(),
            min_response_length: default_min_response_length(),
            placeholder: default_placeholder(),
        }
    }
}

/// A generated response and the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub text: String,
    /// `None` for the placeholder
    pub strategy: Option<Strategy>,
}

impl Response {
    fn placeholder(text: &str) -> Self {
        Self {
            text: text.to_string(),
            strategy: None,
        }
    }
}

/// Strategy-table driven generator
#[derive(Debug, Clone)]
pub struct ResponseGenerator {
    config: GeneratorConfig,
    table: Vec<StrategyEntry>,
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl ResponseGenerator {
    /// Build the standard three-row table from `config`
    pub fn new(mut config: GeneratorConfig) -> Self {
        if config.min_walk_steps > config.max_walk_steps {
            std::mem::swap(&mut config.min_walk_steps, &mut config.max_walk_steps);
        }

        let table = vec![
            StrategyEntry::new(Strategy::PhraseRecall, config.phrase_chance),
            StrategyEntry::new(Strategy::ChainWalk, config.chain_chance),
            StrategyEntry::new(Strategy::VerbatimRecall, 1.0),
        ];

        Self { config, table }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn table(&self) -> &[StrategyEntry] {
        &self.table
    }

    /// Generate a response; `trigger` may be empty
    pub fn generate<R: Rng + ?Sized>(
        &self,
        corpus: &TrainingCorpus,
        trigger: &str,
        rng: &mut R,
    ) -> Response {
        if !corpus.has_at_least(self.config.min_messages) {
            return Response::placeholder(&self.config.placeholder);
        }

        for entry in &self.table {
            if !entry.strategy.is_available(corpus) || !rng.gen_bool(entry.probability) {
                continue;
            }

            if let Some(text) = entry.strategy.execute(corpus, trigger, &self.config, rng) {
                tracing::debug!("Generated response via {}", entry.strategy);
                return Response {
                    text,
                    strategy: Some(entry.strategy),
                };
            }
        }

        // Only reachable with min_messages = 0 and an empty corpus
        Response::placeholder(&self.config.placeholder)
    }
}

//! Generation strategies
//!
//! Each strategy pairs an availability check with an executor. The
//! generator holds them in an ordered table with a firing probability per
//! entry; see [`crate::generator::ResponseGenerator`].

use crate::generator::chain::{pick_seed, walk};
use crate::generator::response::GeneratorConfig;
use crate::model::TrainingCorpus;
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;

/// Ways a response can be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Return a cached common phrase verbatim
    PhraseRecall,
    /// Random walk over word successors
    ChainWalk,
    /// Return a stored raw message verbatim
    VerbatimRecall,
}

impl Strategy {
    /// Whether the corpus holds the data this strategy needs
    pub fn is_available(&self, corpus: &TrainingCorpus) -> bool {
        match self {
            Strategy::PhraseRecall => !corpus.common_phrases.is_empty(),
            Strategy::ChainWalk => !corpus.word_pairs.is_empty(),
            Strategy::VerbatimRecall => !corpus.messages.is_empty(),
        }
    }

    /// Run the strategy. `None` means it failed and the next one should run.
    pub fn execute<R: Rng + ?Sized>(
        &self,
        corpus: &TrainingCorpus,
        trigger: &str,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Option<String> {
        match self {
            Strategy::PhraseRecall => pick(&corpus.common_phrases, rng),
            Strategy::ChainWalk => chain_response(corpus, trigger, config, rng),
            Strategy::VerbatimRecall => pick(&corpus.messages, rng),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::PhraseRecall => write!(f, "phrase_recall"),
            Strategy::ChainWalk => write!(f, "chain_walk"),
            Strategy::VerbatimRecall => write!(f, "verbatim_recall"),
        }
    }
}

/// One row of the strategy table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyEntry {
    pub strategy: Strategy,
    /// Chance in [0, 1] that the strategy fires when available
    pub probability: f64,
}

impl StrategyEntry {
    /// Out-of-range chances are clamped; NaN never fires
    pub fn new(strategy: Strategy, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            strategy,
            probability,
        }
    }
}

fn pick<R: Rng + ?Sized>(items: &VecDeque<String>, rng: &mut R) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len())).cloned()
}

fn chain_response<R: Rng + ?Sized>(
    corpus: &TrainingCorpus,
    trigger: &str,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Option<String> {
    let seed = pick_seed(corpus, trigger, rng)?;
    let steps = rng.gen_range(config.min_walk_steps..=config.max_walk_steps);
    let response = walk(corpus, seed, steps, rng).join(" ");

    if response.chars().count() > config.min_response_length {
        Some(response)
    } else {
        tracing::debug!("Chain walk too short ({:?}), falling through", response);
        None
    }
}

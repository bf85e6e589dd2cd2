//! Word-chain generation
//!
//! An order-1 random walk over the corpus `word_pairs`: start from a seed
//! word, repeatedly append a uniformly chosen successor of the current word,
//! stop when the walk length is reached or the word has no successors.

use crate::model::{tokenize, TrainingCorpus};
use rand::seq::SliceRandom;
use rand::Rng;

/// Choose the walk's first word.
///
/// The first lowercased trigger token that is a known key wins; otherwise a
/// key is picked uniformly at random. `None` only if there are no keys.
pub fn pick_seed<R: Rng + ?Sized>(
    corpus: &TrainingCorpus,
    trigger: &str,
    rng: &mut R,
) -> Option<String> {
    let lowered = trigger.to_lowercase();
    let from_trigger = tokenize(&lowered)
        .into_iter()
        .find(|word| corpus.word_pairs.contains_key(*word));

    if let Some(word) = from_trigger {
        return Some(word.to_string());
    }

    if corpus.word_pairs.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..corpus.word_pairs.len());
    corpus.word_pairs.get_index(idx).map(|(key, _)| key.clone())
}

/// Walk up to `steps` successors from `seed`. The seed is the first word.
pub fn walk<R: Rng + ?Sized>(
    corpus: &TrainingCorpus,
    seed: String,
    steps: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut words = Vec::with_capacity(steps + 1);
    words.push(seed);

    for _ in 0..steps {
        let current = &words[words.len() - 1];
        let next = match corpus.successors(current).and_then(|s| s.choose(rng)) {
            Some(next) => next.clone(),
            None => break,
        };
        words.push(next);
    }

    words
}

//! Model Store
//!
//! Learned state for a single speaker and its on-disk persistence:
//!
//! - **corpus**: Messages, word successors and the common-phrase cache
//! - **store**: Load/persist around the corpus, learning entry points, stats
//! - **error**: Error types
//!
//! # Write Path
//!
//! ```text
//!   message → tokenize → messages / word_pairs / common_phrases → JSON file
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use mimic::model::ModelStore;
//!
//! let mut store = ModelStore::open("./mimic_data.json");
//! store.learn("I love coding in Rust");
//! println!("{}", store.stats());
//! ```

pub mod corpus;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use corpus::{tokenize, CorpusLimits, TrainingCorpus};
pub use error::{ModelError, ModelResult};
pub use store::{ModelStats, ModelStore};

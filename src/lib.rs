//! # Mimic
//!
//! Style mimicry for chat: learns one speaker's messages and produces new
//! messages that sound like them.
//!
//! ## Features
//!
//! - **Incremental learning**: every message updates the model and is persisted
//! - **Word-pair model**: order-1 successor lists keyed by lowercased word
//! - **Phrase cache**: short messages recalled verbatim
//! - **Weighted fallback**: phrase recall, chain walk, then verbatim recall
//!
//! ## Modules
//!
//! - [`model`]: Training corpus and its JSON-backed store
//! - [`generator`]: Strategy table and chain walk
//! - [`engine`]: The public learn/generate/stats surface
//! - [`config`]: TOML + environment configuration
//! - [`import`]: Bulk training sources for the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mimic::MimicEngine;
//!
//! let mut engine = MimicEngine::open("./mimic_data.json");
//!
//! for message in [
//!     "I love coding in Python",
//!     "Python is my favorite language",
//!     "Let's build something amazing",
//!     "That sounds like a plan",
//!     "I agree with that idea",
//! ] {
//!     engine.learn_from_message(message);
//! }
//!
//! println!("{}", engine.generate_response("what do you think of python?"));
//! println!("{}", engine.get_stats());
//! ```

pub mod config;
pub mod engine;
pub mod generator;
pub mod import;
pub mod model;

// Re-export top-level types for convenience
pub use engine::MimicEngine;

pub use model::{CorpusLimits, ModelError, ModelResult, ModelStats, ModelStore, TrainingCorpus};

pub use generator::{
    GeneratorConfig, Response, ResponseGenerator, Strategy, StrategyEntry, STILL_LEARNING,
};

pub use config::{Config, ConfigError, LoggingConfig, ModelConfig};

pub use import::{CsvImporter, ImportError, ImportResult};

//! Response Generator
//!
//! Turns a trained corpus into new text in the speaker's style:
//!
//! - **response**: `ResponseGenerator`, its config and the strategy cascade
//! - **strategy**: The individual strategies and the table row type
//! - **chain**: Seed selection and the successor random walk

pub mod chain;
pub mod response;
pub mod strategy;

pub use response::{GeneratorConfig, Response, ResponseGenerator, STILL_LEARNING};
pub use strategy::{Strategy, StrategyEntry};

//! Chunked meeting summarization: token-aware splitting, per-chunk
//! summaries, an optional consolidation pass and a fallback strategy chain.
//!
//! Tokenizer and summarizer models are services behind the traits in
//! [`traits`]; concrete ones live in `minutes-model`.

#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod chunker;
pub mod config;
pub mod controller;
pub mod data_processor;
pub mod error;
pub mod logging;
pub mod strategy;
pub mod text;
pub mod traits;
pub mod types;

pub use chunker::TokenChunker;
pub use config::{Config, LengthHeuristic, ModelSettings, ReportSettings, SummarizeOptions};
pub use controller::{summarize, AbstractiveStrategy, ChunkedSummarizer};
pub use error::SummarizeError;
pub use strategy::{ChainOutcome, StrategyChain};
pub use traits::{SummarizerService, SummaryStrategy, TokenizerService};

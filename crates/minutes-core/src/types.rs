//! Domain types shared by the controller, the heuristics and the report.

use serde::{Deserialize, Serialize};

/// A contiguous window of a document's tokens, decoded back to text.
///
/// - `index`: position within the plan, after empty chunks are dropped
/// - `start_token`/`end_token`: half-open token range in the source sequence
/// - `text`: decoded and whitespace-normalized payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub start_token: usize,
    pub end_token: usize,
    pub text: String,
}

impl Chunk {
    pub fn token_len(&self) -> usize {
        self.end_token - self.start_token
    }
}

/// The ordered chunks of one document together with its token count.
#[derive(Debug, Clone, Default)]
pub struct ChunkPlan {
    pub total_tokens: usize,
    pub chunks: Vec<Chunk>,
}

impl ChunkPlan {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Output length bounds passed to a summarization service, in tokens.
/// `max_tokens` is a hard cap, `min_tokens` a soft floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLength {
    pub max_tokens: usize,
    pub min_tokens: usize,
}

/// Result of one controller run plus the counters used in logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub summary: String,
    pub chunk_count: usize,
    pub passes: usize,
    pub service_calls: usize,
}

/// Compound and proportional sentiment scores for a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl Default for SentimentScores {
    fn default() -> Self {
        Self { neg: 0.0, neu: 1.0, pos: 0.0, compound: 0.0 }
    }
}

/// A sentence flagged as a follow-up, with the trigger that matched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub text: String,
    pub trigger: String,
}

/// Everything `analyse` produces for one meeting transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingReport {
    pub summary: String,
    pub summary_strategy: String,
    pub key_points: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub sentiment: SentimentScores,
    pub topics: Vec<String>,
    pub word_count: usize,
}

use thiserror::Error;

/// Failures surfaced by the summarization controller and strategy chain.
///
/// Short or empty input is not represented here: it is returned unchanged.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("overlap of {overlap_tokens} tokens must be smaller than the {max_input_tokens}-token chunk size")]
    ChunkingUnderflow { max_input_tokens: usize, overlap_tokens: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("tokenizer service failed: {0:#}")]
    Tokenizer(anyhow::Error),

    #[error("summarization service failed: {0:#}")]
    Summarizer(anyhow::Error),

    #[error("all {} summary strategies failed", .attempts.len())]
    Exhausted { attempts: Vec<(String, String)> },
}

impl SummarizeError {
    /// The underlying service error, when the failure came from a service.
    pub fn service_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Tokenizer(e) | Self::Summarizer(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SummarizeError>;

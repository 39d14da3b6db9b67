use std::ops::Range;

use crate::error::{Result, SummarizeError};
use crate::text::clean_text;
use crate::traits::TokenizerService;
use crate::types::{Chunk, ChunkPlan};

/// Splits token sequences into fixed-size windows that overlap by a fixed count.
#[derive(Debug, Clone, Copy)]
pub struct TokenChunker {
    max_tokens: usize,
    overlap_tokens: usize,
}

impl TokenChunker {
    pub fn new(max_tokens: usize, overlap_tokens: usize) -> Result<Self> {
        if max_tokens == 0 {
            return Err(SummarizeError::InvalidConfig("max_input_tokens must be positive".into()));
        }
        if overlap_tokens >= max_tokens {
            return Err(SummarizeError::ChunkingUnderflow { max_input_tokens: max_tokens, overlap_tokens });
        }
        Ok(Self { max_tokens, overlap_tokens })
    }

    pub fn max_tokens(&self) -> usize { self.max_tokens }

    /// Distance between consecutive window starts. Always positive.
    pub fn step(&self) -> usize { self.max_tokens - self.overlap_tokens }

    /// Half-open token ranges covering `len` tokens.
    ///
    /// A sequence that fits yields one window; otherwise windows of
    /// `max_tokens` advance by `step()` and the last one ends at `len`.
    pub fn windows(&self, len: usize) -> Vec<Range<usize>> {
        if len <= self.max_tokens {
            return vec![0..len];
        }
        let mut windows = Vec::new();
        let mut start = 0;
        while start < len {
            let end = (start + self.max_tokens).min(len);
            windows.push(start..end);
            if end == len { break; }
            start += self.step();
        }
        windows
    }

    /// Encode `text` once and decode each window back to normalized text.
    ///
    /// Text that fits in one window is returned as is, without a decode
    /// round trip. Windows that decode to nothing are dropped.
    pub fn chunk(&self, text: &str, tokenizer: &dyn TokenizerService) -> Result<ChunkPlan> {
        let ids = tokenizer.encode(text).map_err(SummarizeError::Tokenizer)?;
        let total_tokens = ids.len();

        if total_tokens <= self.max_tokens {
            let chunks = if text.is_empty() {
                vec![]
            } else {
                vec![Chunk { index: 0, start_token: 0, end_token: total_tokens, text: text.to_string() }]
            };
            return Ok(ChunkPlan { total_tokens, chunks });
        }

        let mut chunks = Vec::new();
        for window in self.windows(total_tokens) {
            let decoded = tokenizer.decode(&ids[window.clone()]).map_err(SummarizeError::Tokenizer)?;
            let seg_text = clean_text(&decoded);
            if seg_text.is_empty() { continue; }
            chunks.push(Chunk { index: chunks.len(), start_token: window.start, end_token: window.end, text: seg_text });
        }
        tracing::debug!(total_tokens, chunks = chunks.len(), step = self.step(), "Chunked text by tokens");
        Ok(ChunkPlan { total_tokens, chunks })
    }
}

use crate::chunker::TokenChunker;
use crate::config::SummarizeOptions;
use crate::error::{Result, SummarizeError};
use crate::text::{clean_text, word_count};
use crate::traits::{SummarizerService, SummaryStrategy, TokenizerService};
use crate::types::{SummaryLength, SummaryOutcome};

/// Token-aware chunking plus one or two summarization passes.
///
/// Holds its services for its whole lifetime; the caller decides when they
/// are created and dropped. Calls are independent of each other.
pub struct ChunkedSummarizer<T, S>
where
    T: TokenizerService,
    S: SummarizerService,
{
    tokenizer: T,
    summarizer: S,
    options: SummarizeOptions,
}

impl<T, S> ChunkedSummarizer<T, S>
where
    T: TokenizerService,
    S: SummarizerService,
{
    /// Fails with `ChunkingUnderflow` when the overlap would stall chunk advancement.
    pub fn new(tokenizer: T, summarizer: S, options: SummarizeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { tokenizer, summarizer, options })
    }

    pub fn options(&self) -> &SummarizeOptions { &self.options }

    pub fn tokenizer(&self) -> &T { &self.tokenizer }

    pub fn summarize(&self, text: &str) -> Result<String> {
        self.summarize_with_outcome(text).map(|o| o.summary)
    }

    #[tracing::instrument(skip_all, fields(chars = text.len()))]
    pub fn summarize_with_outcome(&self, text: &str) -> Result<SummaryOutcome> {
        run(text, &self.tokenizer, &self.summarizer, &self.options)
    }
}

/// Summarize `text` with explicit services and options.
pub fn summarize(
    text: &str,
    tokenizer: &dyn TokenizerService,
    summarizer: &dyn SummarizerService,
    options: &SummarizeOptions,
) -> Result<String> {
    run(text, tokenizer, summarizer, options).map(|o| o.summary)
}

fn run(
    text: &str,
    tokenizer: &dyn TokenizerService,
    summarizer: &dyn SummarizerService,
    options: &SummarizeOptions,
) -> Result<SummaryOutcome> {
    options.validate()?;
    let chunker = TokenChunker::new(options.max_input_tokens, options.overlap_tokens)?;

    let text = clean_text(text);
    if text.is_empty() || word_count(&text) < options.short_input_words {
        tracing::debug!(words = word_count(&text), "Input below summarization threshold, returning as is");
        return Ok(SummaryOutcome { summary: text, chunk_count: 0, passes: 0, service_calls: 0 });
    }

    let length = options.summary_length();
    let first = summarize_pass(&text, &chunker, tokenizer, summarizer, length)?;
    tracing::info!(chunks = first.chunk_count, "First summarization pass complete");

    if !options.second_pass || first.chunk_count <= 1 {
        return Ok(SummaryOutcome { summary: first.text, chunk_count: first.chunk_count, passes: 1, service_calls: first.chunk_count });
    }

    let second = summarize_pass(&first.text, &chunker, tokenizer, summarizer, length)?;
    tracing::info!(chunks = second.chunk_count, "Consolidation pass complete");

    Ok(SummaryOutcome {
        summary: second.text,
        chunk_count: first.chunk_count,
        passes: 2,
        service_calls: first.chunk_count + second.chunk_count,
    })
}

struct PassResult {
    text: String,
    chunk_count: usize,
}

fn summarize_pass(
    text: &str,
    chunker: &TokenChunker,
    tokenizer: &dyn TokenizerService,
    summarizer: &dyn SummarizerService,
    length: SummaryLength,
) -> Result<PassResult> {
    let plan = chunker.chunk(text, tokenizer)?;
    let mut summaries = Vec::with_capacity(plan.len());
    for chunk in &plan.chunks {
        tracing::debug!(index = chunk.index, start = chunk.start_token, end = chunk.end_token, "Summarizing chunk");
        let out = summarizer.summarize(&chunk.text, length).map_err(SummarizeError::Summarizer)?;
        summaries.push(clean_text(&out));
    }
    Ok(PassResult { text: clean_text(&summaries.join(" ")), chunk_count: plan.len() })
}

/// The chunked controller as the `"abstractive"` strategy of a chain.
pub struct AbstractiveStrategy<T: TokenizerService, S: SummarizerService> {
    inner: ChunkedSummarizer<T, S>,
}

impl<T: TokenizerService, S: SummarizerService> AbstractiveStrategy<T, S> {
    pub fn new(inner: ChunkedSummarizer<T, S>) -> Self { Self { inner } }
}

impl<T: TokenizerService, S: SummarizerService> SummaryStrategy for AbstractiveStrategy<T, S> {
    fn name(&self) -> &str { "abstractive" }

    fn summarize(&self, text: &str) -> anyhow::Result<String> {
        Ok(self.inner.summarize(text)?)
    }
}

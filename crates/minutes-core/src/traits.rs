use crate::types::SummaryLength;

/// Text to token ids and back, used only for length-aware splitting.
pub trait TokenizerService: Send + Sync {
    /// Token ids for `text`, without truncation or special tokens.
    fn encode(&self, text: &str) -> anyhow::Result<Vec<u32>>;
    /// Text for `ids`, skipping special tokens.
    fn decode(&self, ids: &[u32]) -> anyhow::Result<String>;
}

/// A model that condenses text under token length bounds.
///
/// Implementations decode deterministically: identical weights and input
/// give identical output.
pub trait SummarizerService: Send + Sync {
    fn summarize(&self, text: &str, length: SummaryLength) -> anyhow::Result<String>;
}

/// One way of producing a summary; chained in `StrategyChain`.
pub trait SummaryStrategy: Send + Sync {
    fn name(&self) -> &str;
    fn summarize(&self, text: &str) -> anyhow::Result<String>;
}

impl<T: TokenizerService + ?Sized> TokenizerService for std::sync::Arc<T> {
    fn encode(&self, text: &str) -> anyhow::Result<Vec<u32>> { (**self).encode(text) }
    fn decode(&self, ids: &[u32]) -> anyhow::Result<String> { (**self).decode(ids) }
}

impl<T: SummarizerService + ?Sized> SummarizerService for std::sync::Arc<T> {
    fn summarize(&self, text: &str, length: SummaryLength) -> anyhow::Result<String> { (**self).summarize(text, length) }
}

impl<T: TokenizerService + ?Sized> TokenizerService for &T {
    fn encode(&self, text: &str) -> anyhow::Result<Vec<u32>> { (**self).encode(text) }
    fn decode(&self, ids: &[u32]) -> anyhow::Result<String> { (**self).decode(ids) }
}

impl<T: SummarizerService + ?Sized> SummarizerService for &T {
    fn summarize(&self, text: &str, length: SummaryLength) -> anyhow::Result<String> { (**self).summarize(text, length) }
}

use anyhow::{anyhow, Result};
use candle_core::{Device, Tensor};
use std::path::Path;
use tokenizers::Tokenizer;

use minutes_core::traits::TokenizerService;

/// Loads `tokenizer.json` with truncation and padding switched off, so
/// lengths reflect the whole text.
pub fn load_tokenizer(path: &Path) -> Result<Tokenizer> {
    let mut tokenizer = Tokenizer::from_file(path)
        .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", path.display(), e))?;
    tokenizer.with_truncation(None).map_err(|e| anyhow!("Failed to disable truncation: {}", e))?;
    tokenizer.with_padding(None);
    Ok(tokenizer)
}

/// Encoder input for a seq2seq model: special tokens added, cut to
/// `max_len` while keeping the closing `eos` token.
pub fn encode_source(tokenizer: &Tokenizer, text: &str, max_len: usize, eos: u32, device: &Device) -> Result<Tensor> {
    let enc = tokenizer.encode(text, true).map_err(|e| anyhow!("Tokenization failed: {}", e))?;
    let mut ids = enc.get_ids().to_vec();
    if ids.len() > max_len {
        tracing::warn!(tokens = ids.len(), max_len, "Source exceeds encoder limit, truncating");
        ids.truncate(max_len.saturating_sub(1));
        ids.push(eos);
    }
    Ok(Tensor::new(ids.as_slice(), device)?.unsqueeze(0)?)
}

/// A Hugging Face tokenizer as the controller's tokenizer service.
#[derive(Clone)]
pub struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    pub fn new(inner: Tokenizer) -> Self { Self { inner } }

    pub fn from_file(path: &Path) -> Result<Self> { Ok(Self::new(load_tokenizer(path)?)) }

    pub fn inner(&self) -> &Tokenizer { &self.inner }
}

impl TokenizerService for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let enc = self.inner.encode(text, false).map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        Ok(enc.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner.decode(ids, true).map_err(|e| anyhow!("Detokenization failed: {}", e))
    }
}

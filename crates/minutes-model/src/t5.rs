use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{Config as T5Config, T5ForConditionalGeneration};
use tokenizers::Tokenizer;

use crate::device::select_device;
use crate::tokenize::{encode_source, load_tokenizer};
use minutes_core::config::ModelSettings;
use minutes_core::traits::SummarizerService;
use minutes_core::types::SummaryLength;

/// A local T5 checkpoint used as the summarizer service.
///
/// Decoding is greedy, so the same weights and input always give the same
/// summary. The model keeps a KV cache between steps, hence the mutex.
pub struct T5Summarizer {
    model: Mutex<T5ForConditionalGeneration>,
    tokenizer: Tokenizer,
    device: Device,
    eos_token_id: u32,
    decoder_start_token_id: u32,
    use_cache: bool,
    prefix: String,
    max_source_tokens: usize,
}

impl T5Summarizer {
    pub fn load(model_dir: &Path, settings: &ModelSettings) -> Result<Self> {
        let device = select_device();
        tracing::info!(dir = %model_dir.display(), "Loading T5 summarizer");

        let tokenizer = load_tokenizer(&model_dir.join("tokenizer.json"))?;

        let config_path = model_dir.join("config.json");
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: T5Config = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let vb = load_weights(model_dir, &device)?;
        let model = T5ForConditionalGeneration::load(vb, &config)?;
        tracing::info!("T5 summarizer loaded");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            device,
            eos_token_id: u32::try_from(config.eos_token_id)?,
            decoder_start_token_id: u32::try_from(config.decoder_start_token_id.unwrap_or(config.pad_token_id))?,
            use_cache: config.use_cache,
            prefix: settings.prefix.clone(),
            max_source_tokens: settings.max_source_tokens.max(2),
        })
    }

    fn generate(&self, text: &str, length: SummaryLength) -> Result<Vec<u32>> {
        let source = format!("{}{}", self.prefix, text);
        let input_ids = encode_source(&self.tokenizer, &source, self.max_source_tokens, self.eos_token_id, &self.device)?;

        let mut model = self.model.lock().map_err(|_| anyhow!("T5 model lock poisoned"))?;
        model.clear_kv_cache();
        let encoder_output = model.encode(&input_ids)?;

        let mut output = vec![self.decoder_start_token_id];
        for step in 0..length.max_tokens {
            let decoder_ids = if step == 0 || !self.use_cache {
                Tensor::new(output.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last = output[output.len() - 1];
                Tensor::new(&[last], &self.device)?.unsqueeze(0)?
            };
            let logits = model.decode(&decoder_ids, &encoder_output)?.squeeze(0)?;
            let logits = logits.to_dtype(DType::F32)?.to_vec1::<f32>()?;
            let next = greedy_next(&logits, self.eos_token_id, step < length.min_tokens)
                .ok_or_else(|| anyhow!("Model produced empty logits"))?;
            if next == self.eos_token_id {
                break;
            }
            output.push(next);
        }
        model.clear_kv_cache();
        Ok(output.split_off(1))
    }
}

impl SummarizerService for T5Summarizer {
    fn summarize(&self, text: &str, length: SummaryLength) -> Result<String> {
        let start = Instant::now();
        let ids = self.generate(text, length)?;
        let summary = self.tokenizer.decode(&ids, true).map_err(|e| anyhow!("Detokenization failed: {}", e))?;
        tracing::debug!(tokens = ids.len(), ms = start.elapsed().as_millis() as u64, "Generated summary");
        Ok(summary)
    }
}

/// Highest-scoring token; `eos` is skipped while `suppress_eos` holds.
fn greedy_next(logits: &[f32], eos: u32, suppress_eos: bool) -> Option<u32> {
    logits
        .iter()
        .enumerate()
        .filter(|(i, _)| !(suppress_eos && *i as u32 == eos))
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i as u32)
}

fn load_weights(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        tracing::debug!(path = %safetensors.display(), "Loading safetensors weights");
        // SAFETY: the file is memory-mapped read-only and not modified while loaded.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[safetensors], DType::F32, device)? };
        return Ok(vb);
    }
    let bin: PathBuf = model_dir.join("pytorch_model.bin");
    if !bin.exists() {
        anyhow::bail!("No model.safetensors or pytorch_model.bin in {}", model_dir.display());
    }
    tracing::debug!(path = %bin.display(), "Loading pickle weights");
    let weights = candle_core::pickle::read_all(&bin)?;
    let weights_map: std::collections::HashMap<String, Tensor> = weights.into_iter().collect();
    Ok(VarBuilder::from_tensors(weights_map, DType::F32, device))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_picks_highest() {
        assert_eq!(greedy_next(&[0.1, 0.9, 0.3], 1, false), Some(1));
    }

    #[test]
    fn eos_suppressed_until_min_length() {
        assert_eq!(greedy_next(&[0.1, 0.9, 0.3], 1, true), Some(2));
        assert_eq!(greedy_next(&[], 1, true), None);
    }

    #[test]
    fn ties_keep_lowest_id() {
        assert_eq!(greedy_next(&[0.5, 0.5], 9, false), Some(0));
    }
}

//! Local model services: a Hugging Face tokenizer and a T5 summarizer on
//! candle, plus deterministic fakes selected with `APP_USE_FAKE_MODEL`.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minutes_core::config::{expand_path, ModelSettings};
use minutes_core::traits::{SummarizerService, TokenizerService};

pub mod device;
pub mod fake;
pub mod t5;
pub mod tokenize;

pub use fake::{LeadWordsSummarizer, WhitespaceTokenizer};
pub use t5::T5Summarizer;
pub use tokenize::HfTokenizer;

const DEFAULT_MODEL: &str = "t5-small";

/// The tokenizer and summarizer pair the controller runs on.
///
/// Created once by the caller and shared by reference; nothing is cached
/// globally.
#[derive(Clone)]
pub struct Services {
    pub tokenizer: Arc<dyn TokenizerService>,
    pub summarizer: Arc<dyn SummarizerService>,
}

impl Services {
    pub fn fake() -> Self {
        Self { tokenizer: Arc::new(WhitespaceTokenizer::new()), summarizer: Arc::new(LeadWordsSummarizer::default()) }
    }

    pub fn load(model_dir: &Path, settings: &ModelSettings) -> Result<Self> {
        let tokenizer = HfTokenizer::from_file(&model_dir.join("tokenizer.json"))?;
        let summarizer = T5Summarizer::load(model_dir, settings)?;
        Ok(Self { tokenizer: Arc::new(tokenizer), summarizer: Arc::new(summarizer) })
    }
}

pub fn use_fake_model() -> bool {
    std::env::var("APP_USE_FAKE_MODEL").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

/// Fakes when `APP_USE_FAKE_MODEL` is set, otherwise the local checkpoint.
pub fn get_default_services(settings: &ModelSettings, model_dir: Option<&Path>) -> Result<Services> {
    if use_fake_model() {
        tracing::info!("Using fake model services");
        return Ok(Services::fake());
    }
    let dir = resolve_model_dir(settings, model_dir)?;
    Services::load(&dir, settings)
}

/// First existing directory among: the explicit override, `APP_MODEL_DIR`,
/// `MODEL_DIR`, the configured `model.dir`, then `models/t5-small` and
/// `../models/t5-small`.
pub fn resolve_model_dir(settings: &ModelSettings, explicit: Option<&Path>) -> Result<PathBuf> {
    let mut candidates: Vec<(&str, PathBuf)> = Vec::new();
    if let Some(p) = explicit { candidates.push(("--model-dir", p.to_path_buf())); }
    if let Ok(dir) = std::env::var("APP_MODEL_DIR") { candidates.push(("APP_MODEL_DIR", expand_path(dir))); }
    if let Ok(dir) = std::env::var("MODEL_DIR") { candidates.push(("MODEL_DIR", expand_path(dir))); }
    if let Some(dir) = &settings.dir { candidates.push(("model.dir", expand_path(dir))); }
    candidates.push(("default", Path::new("models").join(DEFAULT_MODEL)));
    candidates.push(("default", Path::new("../models").join(DEFAULT_MODEL)));

    for (source, path) in candidates {
        if path.is_dir() {
            tracing::info!(source, dir = %path.display(), "Using model dir");
            return Ok(path);
        }
        tracing::debug!(source, dir = %path.display(), "Model dir candidate missing");
    }
    Err(anyhow!("Could not locate the {} model directory; set APP_MODEL_DIR or pass --model-dir", DEFAULT_MODEL))
}

//! Configuration loader, typed settings sections and path helpers.
//!
//! Uses Figment to merge built-in defaults, `config.toml`, `config.<env>.toml`
//! and `APP_*` env vars (`__` separates nesting, e.g.
//! `APP_SUMMARIZER__MAX_INPUT_TOKENS=512`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::SummarizeError;
use crate::types::SummaryLength;

/// Converts a desired summary length in words into token bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthHeuristic {
    pub words_per_token: f64,
    pub min_max_tokens: usize,
    pub max_max_tokens: usize,
    pub min_ratio: f64,
    pub min_floor_tokens: usize,
}

impl Default for LengthHeuristic {
    fn default() -> Self {
        Self { words_per_token: 0.75, min_max_tokens: 56, max_max_tokens: 220, min_ratio: 0.5, min_floor_tokens: 32 }
    }
}

impl LengthHeuristic {
    pub fn bounds(&self, max_summary_words: usize) -> SummaryLength {
        let approx = (max_summary_words as f64 / self.words_per_token) as usize;
        let max_tokens = approx.clamp(self.min_max_tokens, self.max_max_tokens);
        let min_tokens = ((max_tokens as f64 * self.min_ratio) as usize).max(self.min_floor_tokens);
        SummaryLength { max_tokens, min_tokens }
    }

    fn validate(&self) -> Result<(), SummarizeError> {
        if !(self.words_per_token > 0.0) {
            return Err(SummarizeError::InvalidConfig("words_per_token must be positive".into()));
        }
        if self.min_max_tokens == 0 || self.min_max_tokens > self.max_max_tokens {
            return Err(SummarizeError::InvalidConfig(format!(
                "summary token clamp {}..={} is empty", self.min_max_tokens, self.max_max_tokens
            )));
        }
        if !(0.0..=1.0).contains(&self.min_ratio) {
            return Err(SummarizeError::InvalidConfig("min_ratio must be within 0..=1".into()));
        }
        Ok(())
    }
}

/// Controller settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizeOptions {
    pub max_input_tokens: usize,
    pub overlap_tokens: usize,
    pub max_summary_words: usize,
    pub second_pass: bool,
    pub short_input_words: usize,
    pub length: LengthHeuristic,
}

impl Default for SummarizeOptions {
    fn default() -> Self {
        Self {
            max_input_tokens: 950,
            overlap_tokens: 50,
            max_summary_words: 140,
            second_pass: true,
            short_input_words: 40,
            length: LengthHeuristic::default(),
        }
    }
}

impl SummarizeOptions {
    pub fn validate(&self) -> Result<(), SummarizeError> {
        if self.max_input_tokens == 0 {
            return Err(SummarizeError::InvalidConfig("max_input_tokens must be positive".into()));
        }
        if self.overlap_tokens >= self.max_input_tokens {
            return Err(SummarizeError::ChunkingUnderflow {
                max_input_tokens: self.max_input_tokens,
                overlap_tokens: self.overlap_tokens,
            });
        }
        self.length.validate()
    }

    pub fn summary_length(&self) -> SummaryLength {
        self.length.bounds(self.max_summary_words)
    }
}

/// Where the local summarization model lives and how it is prompted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub dir: Option<String>,
    pub prefix: String,
    pub max_source_tokens: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self { dir: None, prefix: "summarize: ".to_string(), max_source_tokens: 1024 }
    }
}

impl ModelSettings {
    /// Upper bound on the encoder positions a full chunk needs: the chunk,
    /// the prompt prefix (at most one token per char) and the closing EOS.
    pub fn source_tokens_needed(&self, options: &SummarizeOptions) -> usize {
        options.max_input_tokens + self.prefix.chars().count() + 1
    }

    /// Fails when a full chunk would be cut by the encoder limit.
    pub fn check_chunk_fits(&self, options: &SummarizeOptions) -> Result<(), SummarizeError> {
        let needed = self.source_tokens_needed(options);
        if needed > self.max_source_tokens {
            return Err(SummarizeError::InvalidConfig(format!(
                "max_input_tokens {} plus prompt needs {} encoder tokens, model.max_source_tokens is {}",
                options.max_input_tokens, needed, self.max_source_tokens
            )));
        }
        Ok(())
    }
}

/// Limits for the meeting report heuristics and the extractive fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub key_points: usize,
    pub max_action_items: usize,
    pub topics: usize,
    pub fallback_sentences: usize,
    pub textrank_ratio: f64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { key_points: 7, max_action_items: 8, topics: 6, fallback_sentences: 6, textrank_ratio: 0.15 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct Defaults {
    summarizer: SummarizeOptions,
    model: ModelSettings,
    report: ReportSettings,
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(None)
    }

    /// Like `load`, with an extra TOML file merged over the environment files.
    pub fn load_from(extra: Option<&Path>) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Defaults::default())).merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        if let Some(path) = extra {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self::from_figment(figment)?;
        tracing::debug!(env = %env_name, "Loaded configuration");
        Ok(config)
    }

    /// Wrap an already-assembled figment, layering it over the defaults.
    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let figment = Figment::from(Serialized::defaults(Defaults::default())).merge(figment);
        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn summarizer(&self) -> anyhow::Result<SummarizeOptions> { self.get("summarizer") }

    pub fn model(&self) -> anyhow::Result<ModelSettings> { self.get("model") }

    pub fn report(&self) -> anyhow::Result<ReportSettings> { self.get("report") }

    fn validate(&self) -> anyhow::Result<()> {
        let summarizer = self.summarizer()?;
        summarizer.validate()?;
        self.model()?.check_chunk_fits(&summarizer)?;
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

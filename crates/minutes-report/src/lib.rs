//! Meeting reports: a summary from a strategy chain plus the heuristic
//! key points, action items, sentiment and topics.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;

use minutes_core::config::{ReportSettings, SummarizeOptions};
use minutes_core::data_processor::TranscriptLoader;
use minutes_core::error::{Result, SummarizeError};
use minutes_core::text::{clean_text, word_count};
use minutes_core::traits::SummaryStrategy;
use minutes_core::types::MeetingReport;
use minutes_core::{AbstractiveStrategy, ChunkedSummarizer, StrategyChain};
use minutes_model::Services;
use minutes_nlp::{
    extract_action_items, extract_key_points, sentiment_scores, topic_terms, LeadStrategy, TextRankStrategy,
};

/// Which summary strategies a chain is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    Abstractive,
    Textrank,
    Lead,
    /// abstractive, then textrank, then lead
    #[default]
    Auto,
}

impl StrategyKind {
    pub fn needs_model(self) -> bool {
        matches!(self, Self::Abstractive | Self::Auto)
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abstractive" => Ok(Self::Abstractive),
            "textrank" => Ok(Self::Textrank),
            "lead" => Ok(Self::Lead),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown strategy '{other}' (expected abstractive, textrank, lead or auto)")),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Abstractive => "abstractive",
            Self::Textrank => "textrank",
            Self::Lead => "lead",
            Self::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// Build the strategy chain for `kind`.
///
/// Without `services` the abstractive step is left out of an `Auto` chain;
/// an explicit `Abstractive` request then fails with `InvalidConfig`.
pub fn build_chain(
    kind: StrategyKind,
    services: Option<&Services>,
    options: &SummarizeOptions,
    settings: &ReportSettings,
) -> Result<StrategyChain> {
    let mut strategies: Vec<Box<dyn SummaryStrategy>> = Vec::new();

    if kind.needs_model() {
        match services {
            Some(s) => {
                let controller = ChunkedSummarizer::new(s.tokenizer.clone(), s.summarizer.clone(), options.clone())?;
                strategies.push(Box::new(AbstractiveStrategy::new(controller)));
            }
            None if kind == StrategyKind::Abstractive => {
                return Err(SummarizeError::InvalidConfig("abstractive strategy needs model services".into()));
            }
            None => tracing::warn!("No model services, abstractive summaries disabled"),
        }
    }
    if matches!(kind, StrategyKind::Textrank | StrategyKind::Auto) {
        strategies.push(Box::new(TextRankStrategy::new(settings.textrank_ratio, settings.fallback_sentences)));
    }
    if matches!(kind, StrategyKind::Lead | StrategyKind::Auto) {
        strategies.push(Box::new(LeadStrategy::new(settings.fallback_sentences)));
    }

    let chain = StrategyChain::new(strategies)?.with_short_input_words(options.short_input_words);
    tracing::debug!(strategies = ?chain.names(), "Built summary chain");
    Ok(chain)
}

/// Reports written by `MeetingAnalyzer::write_reports`, and the files that failed.
#[derive(Debug, Default)]
pub struct BatchStats {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

pub struct MeetingAnalyzer {
    chain: StrategyChain,
    settings: ReportSettings,
}

impl MeetingAnalyzer {
    pub fn new(chain: StrategyChain, settings: ReportSettings) -> Self {
        Self { chain, settings }
    }

    pub fn chain(&self) -> &StrategyChain { &self.chain }

    #[tracing::instrument(skip_all, fields(chars = text.len()))]
    pub fn analyse(&self, text: &str) -> Result<MeetingReport> {
        let text = clean_text(text);
        let outcome = self.chain.run(&text)?;

        Ok(MeetingReport {
            summary: outcome.summary,
            summary_strategy: outcome.strategy,
            key_points: extract_key_points(&text, self.settings.key_points),
            action_items: extract_action_items(&text, self.settings.max_action_items),
            sentiment: sentiment_scores(&text),
            topics: topic_terms(&text, self.settings.topics),
            word_count: word_count(&text),
        })
    }

    /// Read one transcript, analyse it and write `<stem>.json` into `out_dir`.
    pub fn write_report(&self, loader: &TranscriptLoader, path: &Path, out_dir: &Path) -> anyhow::Result<PathBuf> {
        let transcript = loader.load_file(path)?;
        let report = self.analyse(&transcript.content)?;
        let target = out_dir.join(format!("{}.json", transcript.id));
        fs::write(&target, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        Ok(target)
    }

    /// `write_report` for every path. A failing file is recorded and the
    /// rest still run; `on_done` is called after each file.
    pub fn write_reports<F>(&self, paths: &[PathBuf], out_dir: &Path, mut on_done: F) -> BatchStats
    where
        F: FnMut(&Path, Option<&anyhow::Error>),
    {
        let loader = TranscriptLoader::new();
        let mut stats = BatchStats::default();
        for path in paths {
            match self.write_report(&loader, path, out_dir) {
                Ok(target) => {
                    on_done(path, None);
                    stats.written.push(target);
                }
                Err(e) => {
                    on_done(path, Some(&e));
                    stats.failed.push((path.clone(), format!("{e:#}")));
                }
            }
        }
        tracing::info!(written = stats.written.len(), failed = stats.failed.len(), "Batch finished");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names_parse() {
        assert_eq!("TextRank".parse::<StrategyKind>().unwrap(), StrategyKind::Textrank);
        assert_eq!(StrategyKind::Auto.to_string(), "auto");
        assert!("neural".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn auto_without_services_skips_abstractive() {
        let chain = build_chain(StrategyKind::Auto, None, &SummarizeOptions::default(), &ReportSettings::default()).unwrap();
        assert_eq!(chain.names(), vec!["textrank", "lead"]);
    }

    #[test]
    fn abstractive_without_services_is_rejected() {
        let err = build_chain(StrategyKind::Abstractive, None, &SummarizeOptions::default(), &ReportSettings::default());
        assert!(matches!(err, Err(SummarizeError::InvalidConfig(_))));
    }
}

use crate::error::{Result, SummarizeError};
use crate::text::{clean_text, word_count};
use crate::traits::SummaryStrategy;

/// Which strategy produced a summary, and the summary itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    pub strategy: String,
    pub summary: String,
}

/// Ordered summary strategies, tried until one succeeds.
pub struct StrategyChain {
    strategies: Vec<Box<dyn SummaryStrategy>>,
    short_input_words: usize,
}

impl StrategyChain {
    pub const PASSTHROUGH: &'static str = "passthrough";

    pub fn new(strategies: Vec<Box<dyn SummaryStrategy>>) -> Result<Self> {
        if strategies.is_empty() {
            return Err(SummarizeError::InvalidConfig("a strategy chain needs at least one strategy".into()));
        }
        Ok(Self { strategies, short_input_words: 40 })
    }

    pub fn with_short_input_words(mut self, words: usize) -> Self {
        self.short_input_words = words;
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    #[tracing::instrument(skip_all, fields(strategies = self.strategies.len()))]
    pub fn run(&self, text: &str) -> Result<ChainOutcome> {
        let text = clean_text(text);
        if text.is_empty() || word_count(&text) < self.short_input_words {
            return Ok(ChainOutcome { strategy: Self::PASSTHROUGH.to_string(), summary: text });
        }

        let mut attempts = Vec::new();
        for strategy in &self.strategies {
            match strategy.summarize(&text) {
                Ok(summary) => {
                    tracing::info!(strategy = strategy.name(), failed = attempts.len(), "Summary produced");
                    return Ok(ChainOutcome { strategy: strategy.name().to_string(), summary });
                }
                Err(e) => {
                    tracing::warn!(strategy = strategy.name(), error = %format!("{e:#}"), "Summary strategy failed, trying next");
                    attempts.push((strategy.name().to_string(), format!("{e:#}")));
                }
            }
        }
        Err(SummarizeError::Exhausted { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Fixed(&'static str, Option<&'static str>, Arc<AtomicUsize>);

    impl SummaryStrategy for Fixed {
        fn name(&self) -> &str { self.0 }
        fn summarize(&self, _text: &str) -> anyhow::Result<String> {
            self.2.fetch_add(1, Ordering::SeqCst);
            self.1.map(str::to_string).ok_or_else(|| anyhow::anyhow!("{} unavailable", self.0))
        }
    }

    fn long_text() -> String {
        (0..60).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn falls_through_to_first_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = StrategyChain::new(vec![
            Box::new(Fixed("abstractive", None, calls.clone())),
            Box::new(Fixed("textrank", Some("ranked"), calls.clone())),
            Box::new(Fixed("lead", Some("lead"), calls.clone())),
        ])
        .unwrap();
        let out = chain.run(&long_text()).unwrap();
        assert_eq!(out, ChainOutcome { strategy: "textrank".into(), summary: "ranked".into() });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn exhausted_lists_every_attempt() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = StrategyChain::new(vec![
            Box::new(Fixed("a", None, calls.clone())),
            Box::new(Fixed("b", None, calls.clone())),
        ])
        .unwrap();
        match chain.run(&long_text()) {
            Err(SummarizeError::Exhausted { attempts }) => {
                assert_eq!(attempts.len(), 2);
                assert_eq!(attempts[0].0, "a");
                assert!(attempts[1].1.contains("b unavailable"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn short_input_skips_strategies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = StrategyChain::new(vec![Box::new(Fixed("a", Some("x"), calls.clone()))]).unwrap();
        let out = chain.run("  just a   few words ").unwrap();
        assert_eq!(out.strategy, StrategyChain::PASSTHROUGH);
        assert_eq!(out.summary, "just a few words");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_chain_is_invalid() {
        assert!(matches!(StrategyChain::new(vec![]), Err(SummarizeError::InvalidConfig(_))));
    }
}

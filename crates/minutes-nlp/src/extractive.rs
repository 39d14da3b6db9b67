//! Extractive fallbacks for when no abstractive model is available.

use anyhow::bail;
use rustc_hash::FxHashSet;

use crate::stopwords::{words, StopwordFilter};
use minutes_core::text::{lead_sentences, split_sentences};
use minutes_core::traits::SummaryStrategy;

/// Power iteration settings for sentence ranking.
#[derive(Debug, Clone)]
pub struct SentenceRank {
    pub damping: f64,
    pub max_iterations: usize,
    pub threshold: f64,
}

impl Default for SentenceRank {
    fn default() -> Self {
        Self { damping: 0.85, max_iterations: 100, threshold: 1e-6 }
    }
}

impl SentenceRank {
    /// Weighted PageRank over a dense symmetric similarity matrix.
    ///
    /// Nodes without edges spread their mass uniformly.
    pub fn run(&self, weights: &[Vec<f64>]) -> Vec<f64> {
        let n = weights.len();
        if n == 0 {
            return vec![];
        }
        let totals: Vec<f64> = weights.iter().map(|row| row.iter().sum()).collect();
        let teleport = (1.0 - self.damping) / n as f64;
        let mut scores = vec![1.0 / n as f64; n];
        let mut next = vec![0.0; n];

        for _ in 0..self.max_iterations {
            let dangling: f64 = (0..n).filter(|&i| totals[i] == 0.0).map(|i| scores[i]).sum();
            next.fill(teleport + self.damping * dangling / n as f64);
            for (i, row) in weights.iter().enumerate() {
                if totals[i] == 0.0 { continue; }
                for (j, w) in row.iter().enumerate() {
                    if *w > 0.0 { next[j] += self.damping * scores[i] * w / totals[i]; }
                }
            }
            let delta: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
            std::mem::swap(&mut scores, &mut next);
            if delta <= self.threshold { break; }
        }
        scores
    }
}

/// TextRank sentence selection: sentences are nodes, shared content words
/// are edges weighted by `overlap / (ln|a| + ln|b|)`.
#[derive(Debug, Clone)]
pub struct TextRankSummarizer {
    ratio: f64,
    max_sentences: usize,
    stopwords: StopwordFilter,
    rank: SentenceRank,
}

impl TextRankSummarizer {
    pub fn new(ratio: f64, max_sentences: usize) -> Self {
        Self { ratio, max_sentences, stopwords: StopwordFilter::english(), rank: SentenceRank::default() }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Selected sentences in document order.
    pub fn select(&self, text: &str) -> anyhow::Result<Vec<String>> {
        let sentences = split_sentences(text);
        if sentences.len() < 2 {
            bail!("textrank needs at least two sentences, got {}", sentences.len());
        }

        let bags: Vec<FxHashSet<String>> = sentences
            .iter()
            .map(|s| words(s).into_iter().filter(|w| !self.stopwords.is_stopword(w)).collect())
            .collect();
        let n = sentences.len();
        let mut weights = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let w = similarity(&bags[i], &bags[j]);
                weights[i][j] = w;
                weights[j][i] = w;
            }
        }
        let scores = self.rank.run(&weights);

        let keep = ((self.ratio * n as f64).round() as usize).clamp(1, self.max_sentences.max(1));
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(std::cmp::Ordering::Equal).then(a.cmp(&b)));
        let mut picked: Vec<usize> = order.into_iter().take(keep).collect();
        picked.sort_unstable();
        tracing::debug!(sentences = n, kept = picked.len(), "Ranked sentences");
        Ok(picked.into_iter().map(|i| sentences[i].clone()).collect())
    }
}

fn similarity(a: &FxHashSet<String>, b: &FxHashSet<String>) -> f64 {
    let overlap = a.intersection(b).count();
    if overlap == 0 {
        return 0.0;
    }
    let denom = (a.len() as f64).ln() + (b.len() as f64).ln();
    if denom <= 0.0 { 0.0 } else { overlap as f64 / denom }
}

/// The `"textrank"` strategy.
pub struct TextRankStrategy {
    inner: TextRankSummarizer,
}

impl TextRankStrategy {
    pub fn new(ratio: f64, max_sentences: usize) -> Self {
        Self { inner: TextRankSummarizer::new(ratio, max_sentences) }
    }
}

impl SummaryStrategy for TextRankStrategy {
    fn name(&self) -> &str { "textrank" }

    fn summarize(&self, text: &str) -> anyhow::Result<String> {
        Ok(self.inner.select(text)?.join(" "))
    }
}

/// The `"lead"` strategy: the first sentences, unchanged. Never fails.
pub struct LeadStrategy {
    max_sentences: usize,
}

impl LeadStrategy {
    pub fn new(max_sentences: usize) -> Self { Self { max_sentences } }
}

impl SummaryStrategy for LeadStrategy {
    fn name(&self) -> &str { "lead" }

    fn summarize(&self, text: &str) -> anyhow::Result<String> {
        Ok(lead_sentences(text, self.max_sentences))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_uniform_without_edges() {
        let scores = SentenceRank::default().run(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        assert!((scores[0] - 0.5).abs() < 1e-9 && (scores[1] - 0.5).abs() < 1e-9);
        assert!(SentenceRank::default().run(&[]).is_empty());
    }

    #[test]
    fn central_sentence_wins() {
        let text = "Launch budget approved for the mobile release. \
            The mobile release needs the launch budget and a security review. \
            Security review finishes before the mobile launch. \
            Lunch was pizza.";
        let stop = StopwordFilter::from_list(&["the", "for", "and", "a", "was", "before"]);
        let picked = TextRankSummarizer::new(0.25, 6).with_stopwords(stop).select(text).unwrap();
        assert_eq!(picked, vec!["The mobile release needs the launch budget and a security review."]);
    }

    #[test]
    fn output_keeps_document_order_and_cap() {
        let text = (0..20).map(|i| format!("Budget item {i} covers budget planning.")).collect::<Vec<_>>().join(" ");
        let picked = TextRankSummarizer::new(0.5, 3).select(&text).unwrap();
        assert_eq!(picked.len(), 3);
        let positions: Vec<usize> = picked.iter().map(|p| text.find(p.as_str()).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn single_sentence_is_an_error() {
        assert!(TextRankStrategy::new(0.15, 6).summarize("Only one sentence here.").is_err());
    }

    #[test]
    fn lead_takes_first_sentences() {
        let lead = LeadStrategy::new(2);
        assert_eq!(lead.summarize("One. Two. Three.").unwrap(), "One. Two.");
        assert_eq!(lead.name(), "lead");
    }
}

//! Topic terms from sentence-level TF-IDF over unigrams and bigrams.

use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

use crate::stopwords::StopwordFilter;
use minutes_core::text::split_sentences;

pub const DEFAULT_TOPICS: usize = 6;
const MAX_FEATURES: usize = 2000;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("valid token pattern"));

#[derive(Debug, Clone, Default)]
pub struct TopicExtractor {
    stopwords: StopwordFilter,
}

impl TopicExtractor {
    pub fn new() -> Self { Self::default() }

    pub fn with_stopwords(stopwords: StopwordFilter) -> Self { Self { stopwords } }

    /// Terms ordered by summed L2-normalized TF-IDF weight across sentences.
    ///
    /// Idf is smoothed: `ln((1 + n) / (1 + df)) + 1`. Equal weights order
    /// alphabetically.
    pub fn scored_terms(&self, text: &str) -> Vec<(String, f64)> {
        let docs: Vec<Vec<String>> = split_sentences(text).iter().map(|s| self.terms(s)).collect();
        if docs.is_empty() {
            return vec![];
        }

        let vocabulary = limit_features(&docs);
        let mut df: FxHashMap<&str, usize> = FxHashMap::default();
        for doc in &docs {
            let mut seen: Vec<&str> = doc.iter().map(String::as_str).filter(|t| vocabulary.contains_key(t)).collect();
            seen.sort_unstable();
            seen.dedup();
            for t in seen { *df.entry(t).or_default() += 1; }
        }

        let n = docs.len() as f64;
        let mut totals: FxHashMap<&str, f64> = FxHashMap::default();
        for doc in &docs {
            let mut tf: FxHashMap<&str, f64> = FxHashMap::default();
            for t in doc.iter().filter(|t| vocabulary.contains_key(t.as_str())) {
                *tf.entry(t.as_str()).or_default() += 1.0;
            }
            let weights: Vec<(&str, f64)> = tf
                .into_iter()
                .map(|(t, count)| (t, count * (((1.0 + n) / (1.0 + df[t] as f64)).ln() + 1.0)))
                .collect();
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm == 0.0 { continue; }
            for (t, w) in weights { *totals.entry(t).or_default() += w / norm; }
        }

        let mut scored: Vec<(String, f64)> = totals.into_iter().map(|(t, s)| (t.to_string(), s)).collect();
        scored.sort_by(|a, b| {
            if (a.1 - b.1).abs() < 1e-12 { a.0.cmp(&b.0) } else { b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal) }
        });
        scored
    }

    /// The best `top_k` terms, skipping purely numeric ones.
    pub fn top_terms(&self, text: &str, top_k: usize) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for (term, _) in self.scored_terms(text).into_iter().take(top_k * 2) {
            if term.chars().all(|c| c.is_ascii_digit()) { continue; }
            if out.iter().any(|t| t.eq_ignore_ascii_case(&term)) { continue; }
            out.push(term);
            if out.len() == top_k { break; }
        }
        out
    }

    /// Lowercased unigrams and bigrams; stopwords are dropped before pairing.
    fn terms(&self, sentence: &str) -> Vec<String> {
        let lower = sentence.to_lowercase();
        let tokens: Vec<&str> = TOKEN
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| !self.stopwords.is_stopword(t))
            .collect();
        let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        terms.extend(tokens.windows(2).map(|w| format!("{} {}", w[0], w[1])));
        terms
    }
}

/// The `MAX_FEATURES` most frequent terms across all sentences.
fn limit_features(docs: &[Vec<String>]) -> FxHashMap<&str, usize> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for t in docs.iter().flatten() { *counts.entry(t.as_str()).or_default() += 1; }
    if counts.len() <= MAX_FEATURES {
        return counts;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(MAX_FEATURES);
    ranked.into_iter().collect()
}

/// Topic terms with the default English stopwords.
pub fn topic_terms(text: &str, top_k: usize) -> Vec<String> {
    TopicExtractor::new().top_terms(text, top_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TopicExtractor {
        TopicExtractor::with_stopwords(StopwordFilter::from_list(&["again"]))
    }

    const TEXT: &str = "Budget review slipped. Budget review again. Launch 2024 planned.";

    #[test]
    fn repeated_terms_rank_first() {
        let top = extractor().top_terms(TEXT, 4);
        assert_eq!(top, vec!["budget", "budget review", "review", "review slipped"]);
    }

    #[test]
    fn numeric_terms_are_skipped() {
        let top = extractor().top_terms(TEXT, 10);
        assert_eq!(top.len(), 9);
        assert!(!top.iter().any(|t| t == "2024"));
        assert!(top.iter().any(|t| t == "launch 2024"));
    }

    #[test]
    fn empty_text_has_no_topics() {
        assert!(extractor().top_terms("", 6).is_empty());
        assert!(extractor().top_terms("again.", 6).is_empty());
    }
}

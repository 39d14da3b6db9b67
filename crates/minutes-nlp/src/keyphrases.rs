//! RAKE keyphrase extraction.
//!
//! Candidate phrases are runs of content words bounded by stopwords or
//! punctuation. Each word scores `degree / frequency`, where degree sums the
//! lengths of every phrase occurrence containing the word. A phrase scores
//! the sum of its word scores.

use rustc_hash::FxHashMap;

use crate::stopwords::{words, StopwordFilter};
use minutes_core::text::split_sentences;

pub const DEFAULT_KEY_POINTS: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct KeyphraseExtractor {
    stopwords: StopwordFilter,
}

impl KeyphraseExtractor {
    pub fn new() -> Self { Self::default() }

    pub fn with_stopwords(stopwords: StopwordFilter) -> Self { Self { stopwords } }

    /// Distinct phrases with scores, best first; ties keep first appearance.
    pub fn ranked_phrases(&self, text: &str) -> Vec<(String, f64)> {
        let occurrences = self.candidate_phrases(text);

        let mut frequency: FxHashMap<&str, f64> = FxHashMap::default();
        let mut degree: FxHashMap<&str, f64> = FxHashMap::default();
        for phrase in &occurrences {
            for w in phrase {
                *frequency.entry(w.as_str()).or_default() += 1.0;
                *degree.entry(w.as_str()).or_default() += phrase.len() as f64;
            }
        }

        let mut ranked: Vec<(String, f64)> = Vec::new();
        for phrase in &occurrences {
            let joined = phrase.join(" ");
            if ranked.iter().any(|(p, _)| *p == joined) { continue; }
            let score = phrase.iter().map(|w| degree[w.as_str()] / frequency[w.as_str()]).sum();
            ranked.push((joined, score));
        }
        // stable sort keeps first appearance among equal scores
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// Top `n` phrases as bullet text, first letter capitalized.
    pub fn key_points(&self, text: &str, n: usize) -> Vec<String> {
        self.ranked_phrases(text)
            .into_iter()
            .take(n.max(3))
            .filter_map(|(p, _)| {
                let p = p.trim_matches(|c: char| matches!(c, ' ' | '.' | ',' | '-' | ';'));
                capitalize(p)
            })
            .take(n)
            .collect()
    }

    fn candidate_phrases(&self, text: &str) -> Vec<Vec<String>> {
        let mut phrases = Vec::new();
        for sentence in split_sentences(text) {
            for segment in sentence.split(is_phrase_delimiter) {
                let mut current: Vec<String> = Vec::new();
                for w in words(segment) {
                    if self.stopwords.is_stopword(&w) {
                        if !current.is_empty() { phrases.push(std::mem::take(&mut current)); }
                    } else {
                        current.push(w);
                    }
                }
                if !current.is_empty() { phrases.push(current); }
            }
        }
        phrases
    }
}

fn is_phrase_delimiter(c: char) -> bool {
    matches!(c, ',' | ';' | ':' | '(' | ')' | '[' | ']' | '"' | '“' | '”' | '.' | '!' | '?' | '—' | '–' | '/')
}

fn capitalize(s: &str) -> Option<String> {
    let mut chars = s.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// RAKE key points with the default English stopwords.
pub fn extract_key_points(text: &str, n: usize) -> Vec<String> {
    KeyphraseExtractor::new().key_points(text, n)
}

//! Model-free services for tests and offline runs.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Mutex;

use minutes_core::traits::{SummarizerService, TokenizerService};
use minutes_core::types::SummaryLength;

/// One token per whitespace-separated word, with an interned vocabulary.
///
/// The vocabulary only grows: every distinct word ever encoded keeps its id
/// for the tokenizer's lifetime, so a long-lived shared instance holds all
/// words it has seen. Create a fresh one per run when that matters.
#[derive(Default)]
pub struct WhitespaceTokenizer {
    vocab: Mutex<Vocab>,
}

#[derive(Default)]
struct Vocab {
    ids: HashMap<String, u32>,
    words: Vec<String>,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self { Self::default() }
}

impl TokenizerService for WhitespaceTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let mut vocab = self.vocab.lock().map_err(|_| anyhow!("vocabulary lock poisoned"))?;
        let mut out = Vec::new();
        for word in text.split_whitespace() {
            let id = match vocab.ids.get(word) {
                Some(id) => *id,
                None => {
                    let id = u32::try_from(vocab.words.len())?;
                    vocab.ids.insert(word.to_string(), id);
                    vocab.words.push(word.to_string());
                    id
                }
            };
            out.push(id);
        }
        Ok(out)
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        let vocab = self.vocab.lock().map_err(|_| anyhow!("vocabulary lock poisoned"))?;
        let words = ids
            .iter()
            .map(|id| vocab.words.get(*id as usize).map(String::as_str).ok_or_else(|| anyhow!("unknown token id {id}")))
            .collect::<Result<Vec<_>>>()?;
        Ok(words.join(" "))
    }
}

/// Keeps the first words of its input, about `words_per_token` words per
/// token of the requested maximum.
pub struct LeadWordsSummarizer {
    words_per_token: f64,
}

impl LeadWordsSummarizer {
    pub fn new(words_per_token: f64) -> Self { Self { words_per_token } }
}

impl Default for LeadWordsSummarizer {
    fn default() -> Self { Self::new(0.75) }
}

impl SummarizerService for LeadWordsSummarizer {
    fn summarize(&self, text: &str, length: SummaryLength) -> Result<String> {
        let keep = ((length.max_tokens as f64 * self.words_per_token) as usize).max(1);
        Ok(text.split_whitespace().take(keep).collect::<Vec<_>>().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_stable() {
        let tok = WhitespaceTokenizer::new();
        let a = tok.encode("budget review budget").unwrap();
        assert_eq!(a, vec![0, 1, 0]);
        assert_eq!(tok.decode(&a).unwrap(), "budget review budget");
        assert!(tok.decode(&[42]).is_err());
    }

    #[test]
    fn vocabulary_accumulates_across_calls() {
        let tok = WhitespaceTokenizer::new();
        tok.encode("budget review").unwrap();
        assert_eq!(tok.encode("launch budget").unwrap(), vec![2, 0]);
        assert_eq!(tok.decode(&[1]).unwrap(), "review");
    }

    #[test]
    fn lead_words_respects_max_tokens() {
        let s = LeadWordsSummarizer::default();
        let text = (0..100).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let out = s.summarize(&text, SummaryLength { max_tokens: 8, min_tokens: 4 }).unwrap();
        assert_eq!(out, "w0 w1 w2 w3 w4 w5");
    }
}

//! English stopword filtering backed by the `stop-words` crate.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    pub fn english() -> Self {
        let mut stopwords: FxHashSet<String> = get(LANGUAGE::English).iter().map(|s| s.to_string()).collect();
        // Spoken-meeting filler that the list does not cover.
        for w in ["ok", "okay", "yeah", "um", "uh", "let's", "lets", "gonna"] {
            stopwords.insert(w.to_string());
        }
        Self { stopwords }
    }

    pub fn from_list(words: &[&str]) -> Self {
        Self { stopwords: words.iter().map(|w| w.to_lowercase()).collect() }
    }

    /// Case-insensitive membership.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

/// Lowercased word tokens: runs of alphanumerics, apostrophes and hyphens
/// inside a word are kept (`let's`, `follow-up`).
pub fn words(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        let joiner = matches!(ch, '\'' | '’' | '-')
            && !current.is_empty()
            && chars.get(i + 1).is_some_and(|c| c.is_alphanumeric());
        if ch.is_alphanumeric() || joiner {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list_covers_function_words() {
        let f = StopwordFilter::english();
        assert!(f.is_stopword("the"));
        assert!(f.is_stopword("The"));
        assert!(!f.is_stopword("deployment"));
        assert!(!f.is_empty());
    }

    #[test]
    fn words_keep_inner_apostrophes_and_hyphens() {
        assert_eq!(words("Let's follow-up on API v2—now!"), vec!["let's", "follow-up", "on", "api", "v2", "now"]);
        assert_eq!(words("'quoted' - dash"), vec!["quoted", "dash"]);
    }
}

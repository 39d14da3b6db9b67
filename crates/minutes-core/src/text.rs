//! Whitespace normalization and sentence splitting.

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split after `.`, `?` or `!` when followed by whitespace.
///
/// Sentences are trimmed and empty ones dropped. Terminal punctuation stays
/// attached to its sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut prev_terminal = false;

    for ch in text.chars() {
        if ch.is_whitespace() && prev_terminal {
            push_trimmed(&mut sentences, &current);
            current.clear();
            prev_terminal = false;
            continue;
        }
        current.push(ch);
        prev_terminal = matches!(ch, '.' | '?' | '!');
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(out: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}

/// The first `n` sentences of `text`, space-joined.
pub fn lead_sentences(text: &str, n: usize) -> String {
    split_sentences(text).into_iter().take(n).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a \n\t b   c "), "a b c");
        assert_eq!(clean_text(" \n "), "");
    }

    #[test]
    fn split_keeps_punctuation_and_drops_empty() {
        let s = split_sentences("Ship it. Really?  Yes!\n\nOk");
        assert_eq!(s, vec!["Ship it.", "Really?", "Yes!", "Ok"]);
    }

    #[test]
    fn split_ignores_inner_dots() {
        let s = split_sentences("API v2.1 is blocked. Rohit will fix it.");
        assert_eq!(s, vec!["API v2.1 is blocked.", "Rohit will fix it."]);
    }

    #[test]
    fn lead_sentences_takes_prefix() {
        assert_eq!(lead_sentences("A. B. C.", 2), "A. B.");
        assert_eq!(lead_sentences("", 2), "");
    }
}

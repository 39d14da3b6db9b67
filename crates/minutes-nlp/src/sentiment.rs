//! Lexicon sentiment with negation and intensifiers.
//!
//! Scores follow the VADER normalization: the summed valence `s` maps to
//! `compound = s / sqrt(s² + 15)`, and `pos`/`neg`/`neu` are proportions of
//! the sentiment mass, summing to 1.
//!
//! The lexicon is a compact list of words common in meetings, not the full
//! VADER lexicon, so scores are approximate: text outside its vocabulary
//! scores neutral, and values differ from `polarity_scores` on the same text.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

use crate::stopwords::words;
use minutes_core::types::SentimentScores;

const ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;

static LEXICON: LazyLock<FxHashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        ("good", 1.9), ("great", 3.1), ("excellent", 3.2), ("awesome", 3.1), ("amazing", 2.8),
        ("happy", 2.7), ("glad", 2.0), ("pleased", 2.2), ("love", 3.2), ("like", 1.5),
        ("agree", 1.5), ("agreed", 1.5), ("approve", 1.6), ("approved", 1.8), ("success", 2.7),
        ("successful", 2.8), ("progress", 1.8), ("improve", 1.9), ("improved", 2.1), ("win", 2.8),
        ("benefit", 2.0), ("helpful", 1.9), ("thanks", 1.9), ("thank", 1.5), ("resolved", 1.6),
        ("fixed", 1.1), ("ready", 1.1), ("easy", 1.9), ("confident", 2.2), ("nice", 1.8),
        ("bad", -2.5), ("terrible", -2.1), ("awful", -2.0), ("poor", -2.1), ("sad", -2.1),
        ("angry", -2.3), ("hate", -2.7), ("problem", -1.7), ("problems", -1.7), ("issue", -0.9),
        ("issues", -0.9), ("blocked", -1.3), ("blocker", -1.5), ("delay", -1.3), ("delayed", -1.3),
        ("late", -1.2), ("risk", -1.1), ("risky", -1.4), ("fail", -2.5), ("failed", -2.3),
        ("failure", -2.3), ("broken", -2.1), ("bug", -1.2), ("bugs", -1.2), ("concern", -1.2),
        ("concerned", -1.4), ("worried", -1.9), ("difficult", -1.5), ("frustrated", -2.2), ("wrong", -2.1),
        ("miss", -1.1), ("missed", -1.2), ("outage", -1.8), ("crash", -1.7), ("unfortunately", -1.5),
        ("appreciate", 2.1), ("appreciated", 2.3), ("excited", 2.2), ("perfect", 2.7), ("solid", 1.3),
        ("smooth", 1.4), ("strong", 1.7), ("clear", 1.2), ("effective", 2.0), ("efficient", 1.8),
        ("positive", 2.3), ("productive", 1.8), ("useful", 1.7), ("valuable", 2.1), ("welcome", 2.0),
        ("wonderful", 2.7), ("fantastic", 2.6), ("congrats", 2.4), ("congratulations", 2.9), ("achieved", 1.8),
        ("accomplished", 1.8), ("support", 1.7), ("opportunity", 1.8), ("hopeful", 1.6), ("better", 1.9),
        ("crashed", -1.7), ("worse", -2.1), ("worst", -3.1), ("slow", -0.9), ("slipped", -1.2),
        ("overdue", -1.1), ("confusing", -1.3), ("confused", -1.3), ("disappointed", -1.9), ("disappointing", -2.2),
        ("unclear", -1.0), ("stuck", -1.4), ("urgent", -0.8), ("complaint", -1.5), ("complaints", -1.5),
        ("negative", -2.1), ("lost", -1.3), ("error", -1.4), ("errors", -1.4), ("upset", -1.6),
        ("unhappy", -1.8), ("stressed", -1.9), ("annoying", -1.9), ("regression", -1.0), ("escalation", -0.9),
    ]
    .into_iter()
    .collect()
});

static BOOSTERS: &[&str] = &["very", "really", "extremely", "highly", "super", "so", "totally", "incredibly"];
static NEGATIONS: &[&str] = &["not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "cannot", "without"];

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

/// Valence of every word in `text`, with neutral words as 0.
fn valences(tokens: &[String]) -> Vec<f64> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let Some(&base) = LEXICON.get(w.as_str()) else { return 0.0 };
            let mut v = base;
            if i > 0 && BOOSTERS.contains(&tokens[i - 1].as_str()) {
                v += BOOSTER_INCREMENT * base.signum();
            }
            let window = &tokens[i.saturating_sub(3)..i];
            if window.iter().any(|p| is_negation(p)) {
                v *= NEGATION_SCALAR;
            }
            v
        })
        .collect()
}

pub fn sentiment_scores(text: &str) -> SentimentScores {
    let tokens = words(text);
    let vals = valences(&tokens);
    if vals.is_empty() {
        return SentimentScores::default();
    }

    let sum: f64 = vals.iter().sum();
    let compound = if sum == 0.0 { 0.0 } else { sum / (sum * sum + ALPHA).sqrt() };

    let mut pos = 0.0;
    let mut neg = 0.0;
    let mut neu = 0.0;
    for v in &vals {
        if *v > 0.0 {
            pos += v + 1.0;
        } else if *v < 0.0 {
            neg += v - 1.0;
        } else {
            neu += 1.0;
        }
    }
    let total = pos + neg.abs() + neu;

    SentimentScores {
        neg: round3(neg.abs() / total),
        neu: round3(neu / total),
        pos: round3(pos / total),
        compound: round4(compound),
    }
}

fn round3(x: f64) -> f64 { (x * 1000.0).round() / 1000.0 }

fn round4(x: f64) -> f64 { (x * 10000.0).round() / 10000.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_text_is_all_neutral() {
        let s = sentiment_scores("The meeting started at noon.");
        assert_eq!(s, SentimentScores { neg: 0.0, neu: 1.0, pos: 0.0, compound: 0.0 });
        assert_eq!(sentiment_scores(""), SentimentScores::default());
    }

    #[test]
    fn positive_and_negative_polarity() {
        let good = sentiment_scores("Great progress, the team is happy.");
        assert!(good.compound > 0.5, "{good:?}");
        assert!(good.pos > good.neg);

        let bad = sentiment_scores("The release failed and the launch is delayed.");
        assert!(bad.compound < -0.5, "{bad:?}");
        assert!(bad.neg > bad.pos);
    }

    #[test]
    fn negation_flips_valence() {
        let plain = sentiment_scores("This is good.");
        let negated = sentiment_scores("This is not good.");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn meeting_vocabulary_is_scored() {
        let good = sentiment_scores("Customers appreciated the smooth, productive demo.");
        assert!(good.compound > 0.5, "{good:?}");
        let bad = sentiment_scores("The rollout slipped and the customers are disappointed.");
        assert!(bad.compound < -0.5, "{bad:?}");
    }

    #[test]
    fn compound_stays_in_range() {
        let s = sentiment_scores(&"great excellent amazing ".repeat(50));
        assert!(s.compound <= 1.0 && s.compound > 0.99);
        assert!((s.pos + s.neu + s.neg - 1.0).abs() < 0.01);
    }
}

//! Follow-up detection over sentences, driven by an ordered trigger table.

use regex::Regex;
use std::sync::LazyLock;

use minutes_core::text::split_sentences;
use minutes_core::types::ActionItem;

pub const DEFAULT_MAX_ACTION_ITEMS: usize = 8;

/// A named pattern that marks a sentence as an action item.
pub struct TriggerPattern {
    pub name: &'static str,
    pub regex: Regex,
}

/// Checked in order; the first match names the trigger.
static TRIGGERS: LazyLock<Vec<TriggerPattern>> = LazyLock::new(|| {
    vec![
        TriggerPattern {
            name: "imperative",
            regex: Regex::new(
                r"(?i)^(please\s+)?(let's\s+|kindly\s+)?(review|create|share|send|prepare|finalize|follow|check|update|implement|fix|test|deploy|schedule|draft|confirm|assign)\b",
            )
            .expect("valid imperative pattern"),
        },
        TriggerPattern {
            name: "deadline",
            regex: Regex::new(r"(?i)\b(by|before)\s+\w+ \d{1,2}\b").expect("valid deadline pattern"),
        },
        TriggerPattern {
            name: "eta",
            regex: Regex::new(r"(?i)\bETA\b").expect("valid eta pattern"),
        },
        TriggerPattern {
            name: "commitment",
            regex: Regex::new(r"(?i)\b(will|shall)\b").expect("valid commitment pattern"),
        },
    ]
});

pub fn trigger_patterns() -> &'static [TriggerPattern] {
    &TRIGGERS
}

/// The name of the first trigger matching `sentence`, if any.
pub fn classify(sentence: &str) -> Option<&'static str> {
    TRIGGERS.iter().find(|t| t.regex.is_match(sentence)).map(|t| t.name)
}

/// Sentences that read as follow-ups: imperatives at the start, deadlines,
/// ETAs and future commitments. Duplicates keep their first position.
pub fn extract_action_items(text: &str, limit: usize) -> Vec<ActionItem> {
    let mut items: Vec<ActionItem> = Vec::new();
    for sentence in split_sentences(text) {
        if items.len() >= limit { break; }
        let Some(trigger) = classify(&sentence) else { continue };
        if items.iter().any(|i| i.text == sentence) { continue; }
        items.push(ActionItem { text: sentence, trigger: trigger.to_string() });
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = "Team met to discuss Q4 launch timelines. Priya will finalize UI copy by Oct 22. \
        Please create the deployment checklist. Let's prepare the UAT plan this week. \
        Backend integration is blocked on API v2. Rohit will update the schema by Friday. \
        We agreed to target a soft launch on Nov 10 pending security review.";

    #[test]
    fn finds_imperatives_and_commitments() {
        let items = extract_action_items(DEMO, DEFAULT_MAX_ACTION_ITEMS);
        let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Priya will finalize UI copy by Oct 22.",
                "Please create the deployment checklist.",
                "Let's prepare the UAT plan this week.",
                "Rohit will update the schema by Friday.",
            ]
        );
        assert_eq!(items[0].trigger, "deadline");
        assert_eq!(items[1].trigger, "imperative");
        assert_eq!(items[3].trigger, "commitment");
    }

    #[test]
    fn duplicates_are_dropped_and_limit_applies() {
        let text = "Send the deck. Send the deck. Fix the build. Test it. Deploy it.";
        let items = extract_action_items(text, 3);
        let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Send the deck.", "Fix the build.", "Test it."]);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        assert!(extract_action_items("Send the deck. Fix the build. Test it. Deploy it.", 0).is_empty());
    }

    #[test]
    fn eta_and_case_insensitivity() {
        assert_eq!(classify("eta for the fix is unknown"), Some("eta"));
        assert_eq!(classify("REVIEW the contract"), Some("imperative"));
        assert_eq!(classify("The weather was nice"), None);
        // imperative only counts at the start
        assert_eq!(classify("We did review it"), None);
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use minutes_core::config::{ReportSettings, SummarizeOptions};
use minutes_core::text::clean_text;
use minutes_core::types::SummaryLength;
use minutes_core::{SummarizeError, SummarizerService};
use minutes_model::{Services, WhitespaceTokenizer};
use minutes_report::{build_chain, MeetingAnalyzer, StrategyKind};

fn transcript() -> String {
    // crates/minutes-report -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
    std::fs::read_to_string(root.join("test_data/meetings/q4_launch.txt")).expect("test transcript")
}

struct OfflineSummarizer;

impl SummarizerService for OfflineSummarizer {
    fn summarize(&self, _text: &str, _length: SummaryLength) -> anyhow::Result<String> {
        anyhow::bail!("model weights missing")
    }
}

fn analyzer(kind: StrategyKind, services: Option<&Services>) -> MeetingAnalyzer {
    let settings = ReportSettings::default();
    let chain = build_chain(kind, services, &SummarizeOptions::default(), &settings).expect("chain");
    MeetingAnalyzer::new(chain, settings)
}

#[test]
fn abstractive_report_with_fake_services() {
    let services = Services::fake();
    let report = analyzer(StrategyKind::Auto, Some(&services)).analyse(&transcript()).expect("report");

    assert_eq!(report.summary_strategy, "abstractive");
    assert_eq!(report.word_count, 231);
    // one chunk, 186 max tokens at 0.75 words per token
    assert_eq!(report.summary.split_whitespace().count(), 139);
    assert_eq!(report.key_points.len(), 7);
    assert_eq!(report.action_items.len(), 8);
    assert_eq!(report.topics.len(), 6);
    assert!((-1.0..=1.0).contains(&report.sentiment.compound));
}

#[test]
fn failing_model_falls_back_to_textrank() {
    let services = Services { tokenizer: Arc::new(WhitespaceTokenizer::new()), summarizer: Arc::new(OfflineSummarizer) };
    let text = clean_text(&transcript());
    let report = analyzer(StrategyKind::Auto, Some(&services)).analyse(&text).expect("report");

    assert_eq!(report.summary_strategy, "textrank");
    assert!(!report.summary.is_empty());
    assert!(text.contains(report.summary.split(". ").next().unwrap().trim_end_matches('.')));
}

#[test]
fn abstractive_only_reports_exhaustion() {
    let services = Services { tokenizer: Arc::new(WhitespaceTokenizer::new()), summarizer: Arc::new(OfflineSummarizer) };
    let err = analyzer(StrategyKind::Abstractive, Some(&services)).analyse(&transcript()).unwrap_err();
    match err {
        SummarizeError::Exhausted { attempts } => {
            assert_eq!(attempts.len(), 1);
            assert_eq!(attempts[0].0, "abstractive");
            assert!(attempts[0].1.contains("model weights missing"), "{}", attempts[0].1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn short_meeting_passes_through() {
    let report = analyzer(StrategyKind::Lead, None).analyse("  Quick sync.   Ship it Friday.  ").expect("report");
    assert_eq!(report.summary, "Quick sync. Ship it Friday.");
    assert_eq!(report.summary_strategy, "passthrough");
    assert_eq!(report.word_count, 5);
}

#[test]
fn report_serializes_to_json() {
    let report = analyzer(StrategyKind::Lead, None).analyse(&transcript()).expect("report");
    assert_eq!(report.summary_strategy, "lead");
    let json = serde_json::to_value(&report).expect("json");
    for key in ["summary", "key_points", "action_items", "sentiment", "topics", "word_count"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn batch_continues_past_unreadable_files() {
    let tmp = tempfile::TempDir::new().expect("tempdir");
    let dir = tmp.path();
    std::fs::write(dir.join("a.txt"), transcript()).expect("write a");
    std::fs::write(dir.join("c.txt"), "Short sync. Ship it Friday.").expect("write c");
    let out = dir.join("reports");
    std::fs::create_dir_all(&out).expect("out dir");
    let paths = vec![dir.join("a.txt"), dir.join("b.txt"), dir.join("c.txt")];

    let mut seen = Vec::new();
    let stats = analyzer(StrategyKind::Lead, None).write_reports(&paths, &out, |path, err| {
        seen.push((path.file_name().unwrap().to_string_lossy().to_string(), err.is_some()));
    });

    assert_eq!(seen, vec![("a.txt".to_string(), false), ("b.txt".to_string(), true), ("c.txt".to_string(), false)]);
    assert_eq!(stats.written, vec![out.join("a.json"), out.join("c.json")]);
    assert_eq!(stats.failed.len(), 1);
    assert_eq!(stats.failed[0].0, dir.join("b.txt"));

    let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(out.join("c.json")).unwrap()).unwrap();
    assert_eq!(report["summary"], "Short sync. Ship it Friday.");
}

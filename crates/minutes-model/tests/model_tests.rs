use std::path::Path;

use tempfile::TempDir;

use minutes_core::config::ModelSettings;
use minutes_core::{ChunkedSummarizer, SummarizeOptions, TokenizerService};
use minutes_model::{get_default_services, resolve_model_dir};

fn meeting(words: usize) -> String {
    (0..words).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

#[test]
fn fake_services_drive_the_controller() {
    // Force fakes to avoid loading a checkpoint
    std::env::set_var("APP_USE_FAKE_MODEL", "1");

    let services = get_default_services(&ModelSettings::default(), None).expect("services");
    let ids = services.tokenizer.encode("alpha beta alpha").expect("encode");
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], ids[2]);
    assert_eq!(services.tokenizer.decode(&ids).expect("decode"), "alpha beta alpha");

    let controller = ChunkedSummarizer::new(
        services.tokenizer.clone(),
        services.summarizer.clone(),
        SummarizeOptions::default(),
    )
    .expect("controller");
    let text = meeting(2000);
    let outcome = controller.summarize_with_outcome(&text).expect("summarize");
    assert_eq!(outcome.chunk_count, 3);
    assert_eq!(outcome.passes, 2);
    // 186 max tokens at 0.75 words per token keeps 139 words
    assert_eq!(outcome.summary.split_whitespace().count(), 139);
    assert!(outcome.summary.starts_with("w0 w1 w2"));

    // Deterministic for same input
    assert_eq!(controller.summarize(&text).expect("again"), outcome.summary);
}

#[test]
fn explicit_model_dir_wins() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = resolve_model_dir(&ModelSettings::default(), Some(tmp.path())).expect("resolve");
    assert_eq!(dir, tmp.path());
}

#[test]
fn configured_model_dir_is_used() {
    let tmp = TempDir::new().expect("tempdir");
    let settings = ModelSettings { dir: Some(tmp.path().display().to_string()), ..Default::default() };
    let missing = Path::new("/definitely/not/a/model/dir");
    // Env overrides rank above model.dir; no other test in this binary sets them
    std::env::remove_var("APP_MODEL_DIR");
    std::env::remove_var("MODEL_DIR");

    let dir = resolve_model_dir(&settings, Some(missing)).expect("resolve");
    assert_eq!(dir, tmp.path());
}

use std::path::PathBuf;

use anyhow::Result;
use minutes_core::{logging, ChunkedSummarizer, Config};
use minutes_model::get_default_services;

fn main() -> Result<()> {
    logging::init();
    let path = std::env::args().nth(1).map(PathBuf::from).ok_or_else(|| anyhow::anyhow!("usage: summarize <file>"))?;
    let text = std::fs::read_to_string(&path)?;

    let config = Config::load()?;
    let services = get_default_services(&config.model()?, None)?;
    let controller = ChunkedSummarizer::new(services.tokenizer, services.summarizer, config.summarizer()?)?;
    let outcome = controller.summarize_with_outcome(&text)?;

    println!("chunks={} passes={} calls={}", outcome.chunk_count, outcome.passes, outcome.service_calls);
    println!("{}", outcome.summary);
    Ok(())
}

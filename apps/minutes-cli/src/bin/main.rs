use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use minutes_core::data_processor::TranscriptLoader;
use minutes_core::text::{clean_text, word_count};
use minutes_core::{logging, Config, ReportSettings, SummarizeOptions, TokenChunker};
use minutes_model::{get_default_services, Services};
use minutes_report::{build_chain, MeetingAnalyzer, StrategyKind};

#[derive(Parser)]
#[command(name = "minutes", about = "Summarize and analyse meeting transcripts offline")]
struct Cli {
    /// Extra TOML config merged over config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding tokenizer.json, config.json and the model weights
    #[arg(long, global = true)]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a summary of FILE (stdin when absent)
    Summarize {
        file: Option<PathBuf>,
        /// abstractive, textrank, lead or auto
        #[arg(long, default_value_t = StrategyKind::Auto)]
        strategy: StrategyKind,
        /// Skip summarizing the joined chunk summaries
        #[arg(long)]
        no_second_pass: bool,
        /// Target summary length in words
        #[arg(long)]
        max_words: Option<usize>,
    },
    /// Print the meeting report for FILE as JSON
    Analyse { file: Option<PathBuf> },
    /// Show how FILE would be split into model-sized chunks
    Chunks { file: Option<PathBuf> },
    /// Analyse every .txt under DIR and write <stem>.json reports
    Batch {
        dir: PathBuf,
        /// Output directory, defaults to DIR/reports
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

struct App {
    config: Config,
    model_dir: Option<PathBuf>,
}

impl App {
    fn options(&self) -> Result<SummarizeOptions> { self.config.summarizer() }

    fn report_settings(&self) -> Result<ReportSettings> { self.config.report() }

    fn services(&self) -> Result<Services> {
        get_default_services(&self.config.model()?, self.model_dir.as_deref()).context("Failed to load model services")
    }

    /// Services for `kind`; an `Auto` chain runs without them if loading fails.
    fn services_for(&self, kind: StrategyKind) -> Result<Option<Services>> {
        match kind {
            StrategyKind::Abstractive => self.services().map(Some),
            StrategyKind::Auto => match self.services() {
                Ok(s) => Ok(Some(s)),
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "Model unavailable, using extractive summaries");
                    Ok(None)
                }
            },
            StrategyKind::Textrank | StrategyKind::Lead => Ok(None),
        }
    }

    fn analyzer(&self) -> Result<MeetingAnalyzer> {
        let settings = self.report_settings()?;
        let services = self.services_for(StrategyKind::Auto)?;
        let chain = build_chain(StrategyKind::Auto, services.as_ref(), &self.options()?, &settings)?;
        Ok(MeetingAnalyzer::new(chain, settings))
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(TranscriptLoader::new().load_file(path)?.content),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn summarize(app: &App, file: Option<&Path>, kind: StrategyKind, no_second_pass: bool, max_words: Option<usize>) -> Result<()> {
    let mut options = app.options()?;
    if no_second_pass {
        options.second_pass = false;
    }
    if let Some(words) = max_words {
        options.max_summary_words = words;
    }
    options.validate()?;

    let text = read_input(file)?;
    let services = app.services_for(kind)?;
    let chain = build_chain(kind, services.as_ref(), &options, &app.report_settings()?)?;
    let outcome = chain.run(&text)?;
    tracing::info!(strategy = %outcome.strategy, "Summary ready");
    println!("{}", outcome.summary);
    Ok(())
}

fn analyse(app: &App, file: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    let report = app.analyzer()?.analyse(&text)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn chunks(app: &App, file: Option<&Path>) -> Result<()> {
    let options = app.options()?;
    let text = clean_text(&read_input(file)?);
    let services = app.services()?;
    let chunker = TokenChunker::new(options.max_input_tokens, options.overlap_tokens)?;
    let plan = chunker.chunk(&text, services.tokenizer.as_ref())?;

    println!("{} tokens, {} chunks", plan.total_tokens, plan.len());
    for chunk in &plan.chunks {
        println!("{:>3}  {:>6}..{:<6} {:>5} words", chunk.index, chunk.start_token, chunk.end_token, word_count(&chunk.text));
    }
    Ok(())
}

fn batch(app: &App, dir: &Path, out: Option<&Path>) -> Result<()> {
    let out_dir = out.map_or_else(|| dir.join("reports"), Path::to_path_buf);
    let files = TranscriptLoader::new().list(dir);
    if files.is_empty() {
        println!("No .txt transcripts under {}", dir.display());
        return Ok(());
    }
    fs::create_dir_all(&out_dir).with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let analyzer = app.analyzer()?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} transcripts ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    let stats = analyzer.write_reports(&files, &out_dir, |path, err| {
        if let Some(e) = err {
            pb.suspend(|| tracing::error!(file = %path.display(), error = %format!("{e:#}"), "Transcript failed"));
        }
        pb.inc(1);
    });
    pb.finish_with_message("done");

    println!("Wrote {} reports to {}", stats.written.len(), out_dir.display());
    if !stats.failed.is_empty() {
        anyhow::bail!("{} transcripts could not be read or analysed", stats.failed.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = Config::load_from(cli.config.as_deref()).context("Error loading config")?;
    let app = App { config, model_dir: cli.model_dir };

    match cli.command {
        Command::Summarize { file, strategy, no_second_pass, max_words } => {
            summarize(&app, file.as_deref(), strategy, no_second_pass, max_words)
        }
        Command::Analyse { file } => analyse(&app, file.as_deref()),
        Command::Chunks { file } => chunks(&app, file.as_deref()),
        Command::Batch { dir, out } => batch(&app, &dir, out.as_deref()),
    }
}

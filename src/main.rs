use anyhow::{bail, Context, Result};
use clap::Parser;
use review_consensus::{
    GraphMode, ReviewSummarizer, SelectionOrder, StageTimingObserver, SummarizerConfig,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Summarize album reviews by cross-publication consensus
#[derive(Parser, Debug)]
#[command(name = "review-consensus", version, about, long_about = None)]
struct Args {
    /// Word vector file (`word v1 .. vD` per line)
    #[arg(short, long, env = "REVIEW_CONSENSUS_VECTORS")]
    vectors: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of sentences to print (default: all)
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Graph mode: multi (cross-source only) or single (one document)
    #[arg(short, long, default_value = "multi")]
    mode: GraphMode,

    /// Output order: rank or corpus
    #[arg(short, long)]
    order: Option<SelectionOrder>,

    /// Review files as SOURCE=PATH (a bare PATH uses the file stem as source)
    #[arg(required = true)]
    inputs: Vec<String>,
}

fn parse_input(input: &str) -> (String, PathBuf) {
    match input.split_once('=') {
        Some((source, path)) if !source.is_empty() => (source.to_string(), PathBuf::from(path)),
        _ => {
            let path = PathBuf::from(input);
            let source = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.to_string());
            (source, path)
        }
    }
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn build_config(args: &Args) -> Result<SummarizerConfig> {
    let mut config = match &args.config {
        Some(path) => SummarizerConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SummarizerConfig::default(),
    };
    if let Some(vectors) = &args.vectors {
        config = config.with_word_vectors_path(vectors);
    }
    if let Some(order) = args.order {
        config = config.with_order(order);
    }
    if config.word_vectors_path.is_none() {
        bail!("no word vector file given: pass --vectors or set word_vectors_path in the config");
    }
    Ok(config)
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    if args.mode == GraphMode::SingleDocument && args.inputs.len() != 1 {
        bail!("single mode takes exactly one input, got {}", args.inputs.len());
    }

    let documents = args
        .inputs
        .iter()
        .map(|input| {
            let (source, path) = parse_input(input);
            read_document(&path).map(|text| (source, text))
        })
        .collect::<Result<Vec<_>>>()?;

    let summarizer = ReviewSummarizer::new(config).context("invalid configuration")?;
    summarizer
        .load_word_vectors()
        .context("failed to load word vectors")?;

    let mut observer = StageTimingObserver::new();
    let summary = summarizer.run_with_observer(documents, args.mode, args.top, &mut observer)?;

    for (stage, report) in observer.reports() {
        debug!(stage, elapsed_us = report.elapsed.as_micros() as u64, "stage timing");
    }
    info!(
        sentences = summary.num_sentences,
        selected = summary.len(),
        iterations = summary.iterations,
        converged = summary.converged,
        elapsed_ms = observer.total_elapsed().as_millis() as u64,
        "summarized"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

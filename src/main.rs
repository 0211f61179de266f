//! Command-line front end for the call-for-papers recommender.
//!
//! Every `*.txt` file in the corpus directory becomes one call (id = file
//! stem, long description = file contents). One query is run per
//! invocation and the matches are printed as `id<TAB>relevancy<TAB>explanation`.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default: info).

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use cfp_recommender::{Call, CallRecommender, RecommenderConfig};
use clap::{Args, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Recommend calls for papers from a directory of plain-text calls.
#[derive(Parser)]
#[command(name = "cfp-recommend")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding one `.txt` file per call
    #[arg(long, env = "CFP_CORPUS")]
    corpus: PathBuf,

    #[command(flatten)]
    query: QueryArgs,

    /// Minimum relevancy a match must exceed (defaults to the configured value)
    #[arg(long, value_parser = parse_threshold)]
    threshold: Option<f64>,

    /// Print at most this many matches
    #[arg(long)]
    top: Option<usize>,

    /// JSON file with recommender settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the fitted model snapshot (CBOR) to this path
    #[arg(long)]
    save_model: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct QueryArgs {
    /// Comma-separated keywords
    #[arg(long, value_delimiter = ',')]
    keywords: Option<Vec<String>>,

    /// Title of the paper to place
    #[arg(long)]
    title: Option<String>,

    /// Abstract of the paper to place
    #[arg(long = "abstract")]
    abstract_text: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RecommenderConfig::default(),
    };

    let calls = load_calls(&cli.corpus)?;
    tracing::info!("Loaded {} calls from {}", calls.len(), cli.corpus.display());
    let engine = CallRecommender::with_config(calls, config)
        .with_context(|| format!("failed to build recommender over {}", cli.corpus.display()))?;

    if let Some(path) = &cli.save_model {
        save_snapshot(&engine, path)?;
        tracing::info!("Saved model snapshot to {}", path.display());
    }

    let QueryArgs { keywords, title, abstract_text } = cli.query;
    let mut recs = if let Some(keywords) = keywords {
        engine.recommend_by_keywords(keywords.as_slice(), cli.threshold)
    } else if let Some(title) = title {
        engine.recommend_by_title(&title, cli.threshold)
    } else if let Some(text) = abstract_text {
        engine.recommend_by_abstract(&text, cli.threshold)
    } else {
        bail!("one of --keywords, --title or --abstract is required");
    };

    recs.sort_by_relevancy();
    let recs = match cli.top {
        Some(k) => recs.top(k),
        None => recs,
    };
    if recs.is_empty() {
        tracing::info!("No call is relevant enough");
    }
    print!("{recs}");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Write and flush the model snapshot at `path`.
fn save_snapshot(engine: &CallRecommender<Call>, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    engine
        .save_model(&mut writer)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn parse_threshold(raw: &str) -> std::result::Result<f64, String> {
    let threshold: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if threshold.is_nan() {
        return Err("threshold must be a number, got NaN".to_string());
    }
    Ok(threshold)
}

fn load_config(path: &Path) -> Result<RecommenderConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: RecommenderConfig = serde_json::from_str(&raw)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Read every `*.txt` file directly under `dir`, sorted by file name so the
/// corpus order is stable between runs.
fn load_calls(dir: &Path) -> Result<Vec<Call>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut calls = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            tracing::warn!("Skipping {}: file name is not UTF-8", path.display());
            continue;
        };
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        calls.push(Call::new(id, text));
    }
    Ok(calls)
}

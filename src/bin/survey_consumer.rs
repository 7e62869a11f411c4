//! # Survey Consumer Binary
//!
//! Runs one batch invocation: reads a queue event (`{"Records": [...]}`) from a file or
//! stdin, processes it, and writes the partial batch failure report to stdout.
//! Partial failures are a normal outcome and exit with status 0.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use survey_sentiment::logging::init_structured_logging;
use survey_sentiment::{
    BatchConsumer, BatchEvent, ConsumerConfig, HttpSentimentClassifier, InMemoryResultStore,
    PgResultStore, ResultStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StoreKind {
    /// Process-local store, records are dropped on exit
    Memory,
    /// PostgreSQL table named by the configuration
    Postgres,
}

#[derive(Parser)]
#[command(name = "survey-consumer")]
#[command(about = "Classify and persist a batch of queued survey submissions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file (TOML, YAML or JSON); SURVEY_* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Queue event JSON file; reads stdin when omitted or "-"
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Result store backend
    #[arg(long, value_enum, default_value = "postgres")]
    store: StoreKind,

    /// Create the results table if it does not exist (postgres only)
    #[arg(long)]
    ensure_schema: bool,

    /// Remove expired records instead of processing a batch
    #[arg(long)]
    purge_expired: bool,
}

fn read_event(path: Option<&PathBuf>, mut input: impl Read) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read event file {}", p.display())),
        _ => {
            let mut buf = String::new();
            input
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            Ok(buf)
        }
    }
}

async fn build_store(cli: &Cli, config: &ConsumerConfig) -> Result<Arc<dyn ResultStore>> {
    match cli.store {
        StoreKind::Memory => Ok(Arc::new(InMemoryResultStore::new())),
        StoreKind::Postgres => {
            let store = PgResultStore::connect(
                &config.database_url,
                config.database_max_connections,
                config.table_name.clone(),
            )
            .await?;
            if cli.ensure_schema {
                store.ensure_schema().await?;
            }
            Ok(Arc::new(store))
        }
    }
}

/// Run one invocation. An `Ok` return means an outcome (or purge count) was written,
/// even when the outcome lists failed envelopes.
async fn run(cli: &Cli, input: impl Read, mut output: impl Write) -> Result<()> {
    if cli.ensure_schema && cli.store == StoreKind::Memory {
        bail!("--ensure-schema requires --store postgres");
    }

    let config = ConsumerConfig::load(cli.config.as_deref())?;
    let store = build_store(cli, &config).await?;

    if cli.purge_expired {
        let purged = store.purge_expired(chrono::Utc::now()).await?;
        info!(purged, "Expired records purged");
        writeln!(output, "{}", serde_json::json!({ "purged": purged }))?;
        return Ok(());
    }

    let event = BatchEvent::from_json(&read_event(cli.event.as_ref(), input)?)
        .context("Queue event is not a valid batch")?;
    if event.records.is_empty() {
        warn!("Queue event contains no records");
    }

    let classifier = HttpSentimentClassifier::new(
        config.classifier_endpoint.clone(),
        config.language_code.clone(),
        config.classifier_timeout(),
    )?;

    let consumer = BatchConsumer::new(Arc::new(classifier), store, &config);
    let outcome = consumer.handle_event(event).await;

    writeln!(
        output,
        "{}",
        outcome
            .to_json()
            .context("Failed to encode batch outcome")?
    )?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_structured_logging();

    let cli = Cli::parse();
    run(&cli, std::io::stdin(), std::io::stdout()).await
}

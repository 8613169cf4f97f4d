//! Command-line interface for tx-feed
//!
//! # Usage Examples
//!
//! ```bash
//! # Replay a dataset into the default topic, one record per second
//! tx-feed replay --input Raw-data.csv
//!
//! # Explicit broker and pacing, creating the topic first
//! tx-feed replay --input Raw-data.csv \
//!   --brokers localhost:9093 \
//!   --topic fake-data \
//!   --interval-ms 1000 \
//!   --create-topic
//!
//! # Skip malformed rows instead of aborting
//! tx-feed replay --input Raw-data.csv --on-error skip
//!
//! # Check a dataset without publishing anything
//! tx-feed validate --input Raw-data.csv
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tx_feed::replay::{self, DryRunSink, OnError};
use tx_feed_kafka_sink::KafkaSink;

#[derive(Parser)]
#[command(name = "tx-feed")]
#[command(about = "Replays a credit-card transaction CSV into a Kafka topic as a simulated live feed")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish the source rows to Kafka, one message per interval
    Replay {
        #[command(flatten)]
        args: ReplayArgs,
    },

    /// Transform every source row without publishing and report malformed rows
    Validate {
        /// Path to the transaction CSV file
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Args, Clone)]
struct ReplayArgs {
    /// Path to the transaction CSV file
    #[arg(long)]
    input: PathBuf,

    /// Kafka brokers (comma-separated, e.g., "localhost:9093")
    #[arg(long, env = "KAFKA_BROKERS", default_value = "localhost:9093")]
    brokers: String,

    /// Target Kafka topic
    #[arg(long, default_value = "fake-data")]
    topic: String,

    /// Interval between published records, in milliseconds (must be non-zero)
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Delivery timeout per message, in milliseconds
    #[arg(long, default_value = "5000")]
    message_timeout_ms: u64,

    /// Create the topic before publishing if it doesn't exist
    #[arg(long)]
    create_topic: bool,

    /// Number of partitions when creating the topic
    #[arg(long, default_value = "3")]
    partitions: i32,

    /// Policy for rows that fail type coercion
    #[arg(long, value_enum, default_value = "abort")]
    on_error: OnError,

    /// Dry run mode - transform and log without publishing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { args } => run_replay(args).await,
        Commands::Validate { input } => run_validate(input).await,
    }
}

async fn run_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let rows = tx_feed_csv_source::load(&args.input)?;
    let interval = Duration::from_millis(args.interval_ms);
    let shutdown = setup_shutdown_handler();

    info!(
        "Replaying {} rows to topic '{}' every {}ms",
        rows.len(),
        args.topic,
        args.interval_ms
    );

    let report = if args.dry_run {
        warn!("Running in dry-run mode - no data will be published");
        replay::run(&rows, &DryRunSink, &args.topic, interval, args.on_error, shutdown).await?
    } else {
        let sink = KafkaSink::connect(
            &args.brokers,
            Duration::from_millis(args.message_timeout_ms),
        )
        .context("Failed to create Kafka producer")?;

        if args.create_topic {
            sink.create_topic_if_not_exists(&args.topic, args.partitions)
                .await?;
        }

        let result = replay::run(&rows, &sink, &args.topic, interval, args.on_error, shutdown).await;

        // Drain in-flight messages on every exit path before the producer drops
        if let Err(e) = sink.flush(Duration::from_secs(10)) {
            warn!("Failed to flush producer: {e}");
        }

        result?
    };

    info!(
        "Replay finished: {} published, {} skipped",
        report.published, report.skipped
    );
    Ok(())
}

async fn run_validate(input: PathBuf) -> anyhow::Result<()> {
    let rows = tx_feed_csv_source::load(&input)?;

    let mut malformed = 0u64;
    for row in &rows {
        if let Err(e) = transaction_types::TransactionRecord::from_row(row) {
            warn!("Row {} is malformed: {e}", row.ordinal);
            malformed += 1;
        }
    }

    info!(
        "Validated {} rows: {} well-formed, {} malformed",
        rows.len(),
        rows.len() as u64 - malformed,
        malformed
    );

    if malformed > 0 {
        anyhow::bail!("{malformed} rows failed validation");
    }
    Ok(())
}

/// Sets up a shutdown signal handler
fn setup_shutdown_handler() -> tokio::sync::broadcast::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        info!("Received interrupt signal (Ctrl+C)");
        let _ = shutdown_tx.send(());
    });

    shutdown_rx
}

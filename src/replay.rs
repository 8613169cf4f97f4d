//! Replay loop: paced, ordered publishing of transaction records.
//!
//! Rows are published strictly in file order, one per ticker interval. The
//! ticker replaces a blocking per-row sleep so the loop can be cancelled
//! between publishes by a shutdown signal.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use transaction_types::TransactionRecord;
use tx_feed_csv_source::SourceRow;
use tx_feed_kafka_sink::RecordSink;

/// Policy applied when a source row fails type coercion.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnError {
    /// Stop the whole run at the first malformed row.
    Abort,
    /// Log the malformed row and continue with the next one.
    Skip,
}

/// Summary of a completed (or interrupted) replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Rows published to the sink.
    pub published: u64,
    /// Malformed rows skipped under [`OnError::Skip`].
    pub skipped: u64,
}

/// Sink that logs instead of publishing, for dry-run mode.
pub struct DryRunSink;

#[async_trait::async_trait]
impl RecordSink for DryRunSink {
    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> tx_feed_kafka_sink::Result<()> {
        debug!(
            "Dry run: would publish key={key} ({} bytes) to topic '{topic}'",
            payload.len()
        );
        Ok(())
    }
}

/// Publish `rows` to `sink` in file order, one message per ticker interval.
///
/// The first tick fires immediately; subsequent ticks are spaced by
/// `interval`, bounding the publish rate. The loop stops early when
/// `shutdown` yields, leaving later rows unpublished. Delivery failures are
/// always fatal; row coercion failures follow `on_error`.
pub async fn run<S: RecordSink>(
    rows: &[SourceRow],
    sink: &S,
    topic: &str,
    interval: Duration,
    on_error: OnError,
    mut shutdown: tokio::sync::broadcast::Receiver<()>,
) -> Result<ReplayReport> {
    // tokio::time::interval panics on a zero period
    anyhow::ensure!(
        interval > Duration::ZERO,
        "Publish interval must be non-zero"
    );

    let mut report = ReplayReport::default();

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for row in rows {
        tokio::select! {
            biased;
            _ = shutdown.recv() => {
                info!(
                    "Shutdown requested, stopping after {} published records",
                    report.published
                );
                break;
            }
            _ = ticker.tick() => {}
        }

        let record = match TransactionRecord::from_row(row)
            .with_context(|| format!("Failed to transform row {}", row.ordinal))
        {
            Ok(record) => record,
            Err(e) => match on_error {
                OnError::Abort => return Err(e),
                OnError::Skip => {
                    warn!("Skipping row {}: {e:#}", row.ordinal);
                    report.skipped += 1;
                    continue;
                }
            },
        };

        let payload = record
            .to_payload()
            .with_context(|| format!("Failed to serialize row {}", row.ordinal))?;

        sink.publish(topic, &record.key(), &payload)
            .await
            .with_context(|| format!("Failed to publish row {} to topic '{topic}'", row.ordinal))?;

        report.published += 1;
        info!("Sent record: {}", String::from_utf8_lossy(&payload));
    }

    Ok(report)
}

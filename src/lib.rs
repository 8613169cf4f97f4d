//! tx-feed library
//!
//! Reads a credit-card transaction dataset from CSV, reshapes each row into
//! a strictly-typed record, and publishes the records one per message to a
//! Kafka topic at a fixed interval, simulating a live transaction feed for
//! a downstream fraud-detection dashboard.
//!
//! # Pipeline
//!
//! ```text
//! CSV file ──load──> SourceRow ──coerce──> TransactionRecord
//!                                               │
//!                                          JSON payload
//!                                               │
//!                                        Kafka topic (paced)
//! ```

pub mod replay;

// Re-export member crates for convenience
pub use transaction_types::{RowCoercionError, TransactionRecord};
pub use tx_feed_csv_source as csv_source;
pub use tx_feed_kafka_sink as kafka_sink;

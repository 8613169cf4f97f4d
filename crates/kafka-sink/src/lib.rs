//! Kafka producer sink for tx-feed
//!
//! Wraps the rdkafka `FutureProducer` behind the [`RecordSink`] trait: one
//! long-lived producer acquired before the replay loop, one publish per
//! record with the delivery result awaited, and an explicit flush when the
//! loop exits so in-flight messages are drained before the producer drops.

mod error;
mod sink;

pub use error::{KafkaSinkError, Result};
pub use sink::{KafkaSink, RecordSink};

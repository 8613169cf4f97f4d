//! Error types for the Kafka sink.

use thiserror::Error;

/// Errors that can occur while publishing records to Kafka.
#[derive(Error, Debug)]
pub enum KafkaSinkError {
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("Delivery failed for topic '{topic}': {source}")]
    Delivery {
        topic: String,
        #[source]
        source: rdkafka::error::KafkaError,
    },

    #[error("Topic creation error: {0}")]
    TopicCreation(String),
}

/// Result type alias for sink operations.
pub type Result<T> = std::result::Result<T, KafkaSinkError>;

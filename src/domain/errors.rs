use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Invalid timestamp '{value}' on notification {notification_id}: {source}")]
    InvalidTimestamp {
        notification_id: i64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type AggregationResult<T> = Result<T, AggregationError>;

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid date `{0}`")]
    InvalidDate(String),
    #[error("invalid clock time `{0}`")]
    InvalidTime(String),
    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("empty window: {start} is not before {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

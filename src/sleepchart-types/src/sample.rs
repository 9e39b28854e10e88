use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single heart-rate reading. `value` is `None` when the source had no
/// reading for this instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
}

impl Sample {
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self {
            time,
            value: Some(value),
        }
    }

    pub fn missing(time: DateTime<Utc>) -> Self {
        Self { time, value: None }
    }

    /// The reading, if it is usable for averaging.
    pub fn defined_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmoothedSample {
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
}

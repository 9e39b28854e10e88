use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::SleepStage;

/// Instant on the presentation grid used to label the time axis.
pub type Tick = DateTime<Utc>;

/// One chart point: the smoothed heart rate at `time`, the resting
/// reference line and the stage active at that instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub time: DateTime<Utc>,
    pub heart_rate: Option<f64>,
    pub resting_heart_rate: Option<f64>,
    pub stage: Option<SleepStage>,
    pub stage_level: Option<u8>,
    pub stage_color: Option<&'static str>,
}

impl MergedRecord {
    pub fn untagged(
        time: DateTime<Utc>,
        heart_rate: Option<f64>,
        resting_heart_rate: Option<f64>,
    ) -> Self {
        Self {
            time,
            heart_rate,
            resting_heart_rate,
            stage: None,
            stage_level: None,
            stage_color: None,
        }
    }

    pub fn with_stage(mut self, stage: SleepStage) -> Self {
        let style = stage.style();
        self.stage = Some(stage);
        self.stage_level = Some(style.level);
        self.stage_color = Some(style.color);
        self
    }
}

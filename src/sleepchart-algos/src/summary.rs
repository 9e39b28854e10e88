use std::fmt::Display;

use chrono::TimeDelta;
use serde::Serialize;
use sleepchart_types::{SleepStage, StageInterval};

use crate::helpers::format_hm::FormatHM;

/// Time spent in each charted sleep stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSummary {
    pub deep_seconds: i64,
    pub light_seconds: i64,
    pub rem_seconds: i64,
    pub wake_seconds: i64,
    pub total_awake_minutes: i64,
}

impl SleepSummary {
    pub fn from_intervals(intervals: &[StageInterval]) -> Self {
        let mut summary = Self::default();
        for interval in intervals {
            let Some(stage) = interval.stage.stage() else {
                continue;
            };
            *summary.seconds_mut(stage) += interval.duration().num_seconds();
        }

        // Ties go to the even minute.
        let awake_minutes = summary.wake_seconds as f64 / 60.0;
        summary.total_awake_minutes = awake_minutes.round_ties_even() as i64;
        summary
    }

    pub fn seconds(&self, stage: SleepStage) -> i64 {
        match stage {
            SleepStage::Deep => self.deep_seconds,
            SleepStage::Light => self.light_seconds,
            SleepStage::Rem => self.rem_seconds,
            SleepStage::Wake => self.wake_seconds,
        }
    }

    fn seconds_mut(&mut self, stage: SleepStage) -> &mut i64 {
        match stage {
            SleepStage::Deep => &mut self.deep_seconds,
            SleepStage::Light => &mut self.light_seconds,
            SleepStage::Rem => &mut self.rem_seconds,
            SleepStage::Wake => &mut self.wake_seconds,
        }
    }

    pub fn asleep(&self) -> TimeDelta {
        TimeDelta::seconds(self.deep_seconds + self.light_seconds + self.rem_seconds)
    }
}

impl Display for SleepSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stage in SleepStage::ALL {
            writeln!(
                f,
                "{:<6} {}",
                stage.style().label,
                TimeDelta::seconds(self.seconds(stage)).format_hm()
            )?;
        }
        writeln!(f, "Asleep {}", self.asleep().format_hm())?;
        write!(f, "Awake  {} min", self.total_awake_minutes)
    }
}

use chrono::TimeDelta;
use sleepchart_types::{MergedRecord, Tick};

use crate::{
    ChartError,
    helpers::time_math::{SECONDS_PER_DAY, ceil_to_grid, ensure_ascending},
};

pub const TICK_INTERVAL: TimeDelta = TimeDelta::minutes(15);

/// Plans time-axis labels on a fixed wall-clock grid, independent of how
/// densely the series is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPlanner {
    interval: TimeDelta,
}

impl AxisPlanner {
    /// `interval` must be a whole number of seconds that divides a day.
    pub fn new(interval: TimeDelta) -> Result<Self, ChartError> {
        let seconds = interval.num_seconds();
        if seconds <= 0 {
            return Err(ChartError::invalid("tick_interval", "must be positive"));
        }
        if interval.subsec_nanos() != 0 || SECONDS_PER_DAY % seconds != 0 {
            return Err(ChartError::invalid(
                "tick_interval",
                format!("{seconds}s does not divide a day into whole steps"),
            ));
        }

        Ok(Self { interval })
    }

    pub fn interval(&self) -> TimeDelta {
        self.interval
    }

    /// Grid instants from the first boundary at or after the first record
    /// up to and including the last record's time.
    pub fn plan_ticks(&self, merged: &[MergedRecord]) -> Result<Vec<Tick>, ChartError> {
        let (Some(first), Some(last)) = (merged.first(), merged.last()) else {
            return Ok(Vec::new());
        };
        ensure_ascending("merged records", merged.iter().map(|r| r.time))?;

        let end = last.time;
        let mut ticks = Vec::new();
        let mut tick = ceil_to_grid(first.time, self.interval);

        while let Some(current) = tick.filter(|t| *t <= end) {
            ticks.push(current);
            tick = current.checked_add_signed(self.interval);
        }

        Ok(ticks)
    }
}

impl Default for AxisPlanner {
    fn default() -> Self {
        Self {
            interval: TICK_INTERVAL,
        }
    }
}

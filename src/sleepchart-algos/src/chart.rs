use chrono::TimeDelta;
use sleepchart_types::{MergedRecord, NightData, Tick};

use crate::{
    AxisPlanner, ChartError, HeartRateSmoother, SleepSummary, StageAnnotator, TICK_INTERVAL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub window_size: usize,
    pub tick_interval: TimeDelta,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            window_size: HeartRateSmoother::DEFAULT_WINDOW,
            tick_interval: TICK_INTERVAL,
        }
    }
}

/// Display-ready output for one night.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub records: Vec<MergedRecord>,
    pub ticks: Vec<Tick>,
    pub summary: SleepSummary,
}

/// Smoother, annotator and axis planner chained in dependency order.
#[derive(Debug, Clone, Copy)]
pub struct SleepChart {
    smoother: HeartRateSmoother,
    planner: AxisPlanner,
}

impl SleepChart {
    pub fn new(options: ChartOptions) -> Result<Self, ChartError> {
        Ok(Self {
            smoother: HeartRateSmoother::new(options.window_size)?,
            planner: AxisPlanner::new(options.tick_interval)?,
        })
    }

    pub fn build(&self, night: &NightData) -> Result<ChartData, ChartError> {
        let smoothed = self.smoother.smooth(&night.samples)?;
        let records =
            StageAnnotator::annotate(&smoothed, &night.intervals, night.resting_heart_rate)?;
        let ticks = self.planner.plan_ticks(&records)?;

        trace!(
            "Charted {} records, {} ticks, {} stage intervals",
            records.len(),
            ticks.len(),
            night.intervals.len()
        );

        Ok(ChartData {
            records,
            ticks,
            summary: SleepSummary::from_intervals(&night.intervals),
        })
    }
}

impl Default for SleepChart {
    fn default() -> Self {
        Self {
            smoother: HeartRateSmoother::default(),
            planner: AxisPlanner::default(),
        }
    }
}

use sleepchart_types::{MergedRecord, SmoothedSample, StageInterval, StageTag};

use crate::{ChartError, helpers::time_math::ensure_ascending};

/// Tags every smoothed sample with the sleep stage active at its instant.
pub struct StageAnnotator;

impl StageAnnotator {
    /// Produces one record per smoothed sample, in the same order.
    ///
    /// A sample at `t` takes the stage of the interval with
    /// `start <= t < end`. Samples outside every interval, or inside an
    /// interval whose tag is not a charted stage, stay untagged.
    ///
    /// Both inputs must be sorted by time and intervals must not overlap;
    /// the two sequences are then walked together in a single pass.
    pub fn annotate(
        smoothed: &[SmoothedSample],
        intervals: &[StageInterval],
        resting_heart_rate: Option<f64>,
    ) -> Result<Vec<MergedRecord>, ChartError> {
        ensure_ascending("smoothed samples", smoothed.iter().map(|s| s.time))?;
        Self::validate_intervals(intervals)?;

        for interval in intervals {
            if let StageTag::Unrecognized(tag) = &interval.stage {
                debug!(
                    "Leaving {} - {} untagged: unrecognized sleep stage `{}`",
                    interval.start, interval.end, tag
                );
            }
        }

        let mut next = 0;

        let records = smoothed
            .iter()
            .map(|sample| {
                while intervals
                    .get(next)
                    .is_some_and(|interval| interval.end <= sample.time)
                {
                    next += 1;
                }

                let record =
                    MergedRecord::untagged(sample.time, sample.value, resting_heart_rate);

                match intervals
                    .get(next)
                    .filter(|interval| interval.start <= sample.time)
                    .and_then(|interval| interval.stage.stage())
                {
                    Some(stage) => record.with_stage(stage),
                    None => record,
                }
            })
            .collect();

        Ok(records)
    }

    fn validate_intervals(intervals: &[StageInterval]) -> Result<(), ChartError> {
        for (index, interval) in intervals.iter().enumerate() {
            if interval.start >= interval.end {
                return Err(ChartError::MalformedInput(format!(
                    "stage interval {index} is empty or reversed: {} - {}",
                    interval.start, interval.end
                )));
            }
        }

        for (index, pair) in intervals.windows(2).enumerate() {
            if pair[1].start < pair[0].end {
                return Err(ChartError::MalformedInput(format!(
                    "stage interval {} starts at {} before interval {index} ends at {}",
                    index + 1,
                    pair[1].start,
                    pair[0].end
                )));
            }
        }

        Ok(())
    }
}

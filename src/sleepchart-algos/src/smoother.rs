use sleepchart_types::{Sample, SmoothedSample};

use crate::{
    ChartError,
    helpers::time_math::{ensure_ascending, mean},
};

/// Centered moving average over heart-rate samples.
///
/// Windows are clamped at both ends of the series, so the first and last
/// `radius` points average fewer values instead of being padded. Missing
/// readings are left out of the average; a window without any reading
/// yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartRateSmoother {
    window_size: usize,
}

impl HeartRateSmoother {
    pub const DEFAULT_WINDOW: usize = 9;

    pub fn new(window_size: usize) -> Result<Self, ChartError> {
        if window_size == 0 {
            return Err(ChartError::invalid("window_size", "must be positive"));
        }
        if window_size % 2 == 0 {
            return Err(ChartError::invalid(
                "window_size",
                format!("must be odd, got {window_size}"),
            ));
        }

        Ok(Self { window_size })
    }

    pub fn radius(&self) -> usize {
        (self.window_size - 1) / 2
    }

    pub fn smooth(&self, samples: &[Sample]) -> Result<Vec<SmoothedSample>, ChartError> {
        ensure_ascending("heart-rate samples", samples.iter().map(|s| s.time))?;

        let radius = self.radius();
        let last = samples.len().saturating_sub(1);

        let smoothed = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let lo = i.saturating_sub(radius);
                let hi = i.saturating_add(radius).min(last);
                SmoothedSample {
                    time: sample.time,
                    value: mean(samples[lo..=hi].iter().filter_map(Sample::defined_value)),
                }
            })
            .collect();

        Ok(smoothed)
    }
}

impl Default for HeartRateSmoother {
    fn default() -> Self {
        Self {
            window_size: Self::DEFAULT_WINDOW,
        }
    }
}

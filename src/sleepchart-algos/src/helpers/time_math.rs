use chrono::{DateTime, TimeDelta, Utc};

use crate::ChartError;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Smallest instant `>= time` that lies on a grid of `step` measured from
/// the Unix epoch. For steps that divide a day this is the wall-clock grid
/// in UTC (`step = 15min` gives `:00`, `:15`, `:30`, `:45`).
pub fn ceil_to_grid(time: DateTime<Utc>, step: TimeDelta) -> Option<DateTime<Utc>> {
    let step = step.num_seconds();
    if step <= 0 {
        return None;
    }

    let secs = time.timestamp();
    let rem = secs.rem_euclid(step);
    let aligned = if rem == 0 && time.timestamp_subsec_nanos() == 0 {
        secs
    } else {
        secs.checked_sub(rem)?.checked_add(step)?
    };

    DateTime::from_timestamp(aligned, 0)
}

/// Fails on the first position whose time is earlier than its predecessor.
/// Equal neighbours are accepted.
pub fn ensure_ascending<I>(what: &str, times: I) -> Result<(), ChartError>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut previous: Option<DateTime<Utc>> = None;
    for (index, time) in times.into_iter().enumerate() {
        if let Some(previous) = previous {
            if time < previous {
                return Err(ChartError::MalformedInput(format!(
                    "{what} not sorted by time: index {index} ({time}) precedes {previous}"
                )));
            }
        }
        previous = Some(time);
    }
    Ok(())
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0_f64, 0_u32), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

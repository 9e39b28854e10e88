use chrono::TimeDelta;
use serde::Deserialize;
use sleepchart_types::{NightData, Sample, StageInterval, StageTag};

use crate::{
    DecodeError, TimeWindow,
    helpers::{parse_clock_time, parse_date, parse_timestamp},
};

/// Daily and intraday heart-rate response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeartRateResponse {
    #[serde(rename = "activities-heart", default)]
    pub days: Vec<HeartRateDay>,
    #[serde(rename = "activities-heart-intraday", default)]
    pub intraday: Option<IntradaySeries>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeartRateDay {
    #[serde(rename = "dateTime")]
    pub date: String,
    /// An object with `restingHeartRate` on daily queries, a bare string on
    /// some intraday ones.
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntradaySeries {
    #[serde(default)]
    pub dataset: Vec<IntradayPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntradayPoint {
    pub time: String,
    #[serde(default)]
    pub value: Option<f64>,
}

impl HeartRateResponse {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn resting_heart_rate(&self) -> Option<f64> {
        self.days
            .first()?
            .value
            .get("restingHeartRate")?
            .as_f64()
    }

    /// Intraday readings inside `window`.
    ///
    /// Readings only carry a clock time. The first one is dated with the
    /// first day of the response and the date advances whenever the clock
    /// time goes backwards.
    pub fn samples(&self, window: &TimeWindow) -> Result<Vec<Sample>, DecodeError> {
        let dataset = match &self.intraday {
            Some(series) if !series.dataset.is_empty() => &series.dataset,
            _ => return Ok(Vec::new()),
        };

        let first_day = self
            .days
            .first()
            .ok_or(DecodeError::MissingField("activities-heart"))?;
        let mut date = parse_date(&first_day.date)?;
        let mut last_time = None;
        let mut samples = Vec::with_capacity(dataset.len());

        for point in dataset {
            let time = parse_clock_time(&point.time)?;
            if last_time.is_some_and(|last| time < last) {
                date = date
                    .succ_opt()
                    .ok_or_else(|| DecodeError::InvalidDate(date.to_string()))?;
            }
            last_time = Some(time);

            let instant = date.and_time(time).and_utc();
            if window.contains(instant) {
                samples.push(Sample {
                    time: instant,
                    value: point.value,
                });
            }
        }

        debug!(
            "Decoded {} of {} intraday readings inside {} - {}",
            samples.len(),
            dataset.len(),
            window.start,
            window.end
        );

        Ok(samples)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SleepResponse {
    #[serde(default)]
    pub sleep: Vec<SleepLog>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepLog {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub levels: Option<SleepLevels>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SleepLevels {
    #[serde(default)]
    pub data: Vec<SleepLevelEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepLevelEntry {
    pub date_time: String,
    pub level: StageTag,
    pub seconds: i64,
}

impl SleepResponse {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Stage intervals of every log overlapping `window`, sorted by start.
pub fn stage_intervals(
    logs: &[SleepLog],
    window: &TimeWindow,
) -> Result<Vec<StageInterval>, DecodeError> {
    let mut intervals = Vec::new();

    for log in logs {
        let start = parse_timestamp(&log.start_time)?;
        let end = parse_timestamp(&log.end_time)?;
        if !window.overlaps(start, end) {
            debug!("Skipping sleep log {} - {} outside window", start, end);
            continue;
        }

        let Some(levels) = &log.levels else {
            continue;
        };

        for entry in &levels.data {
            if entry.seconds <= 0 {
                warn!(
                    "Dropping `{}` level at {} with {}s duration",
                    entry.level, entry.date_time, entry.seconds
                );
                continue;
            }

            let start = parse_timestamp(&entry.date_time)?;
            let end = start
                .checked_add_signed(TimeDelta::seconds(entry.seconds))
                .ok_or_else(|| DecodeError::InvalidTimestamp(entry.date_time.clone()))?;
            intervals.push(StageInterval {
                stage: entry.level.clone(),
                start,
                end,
            });
        }
    }

    intervals.sort_by_key(|interval| interval.start);
    Ok(intervals)
}

/// Assembles the core input for `window`. The resting heart rate comes from
/// the daily response when given, otherwise from the intraday one.
pub fn decode_night(
    heart_rate: &HeartRateResponse,
    sleep_logs: &[SleepLog],
    daily: Option<&HeartRateResponse>,
    window: &TimeWindow,
) -> Result<NightData, DecodeError> {
    let samples = heart_rate.samples(window)?;
    let intervals = stage_intervals(sleep_logs, window)?;
    let resting_heart_rate = daily.unwrap_or(heart_rate).resting_heart_rate();

    info!(
        "Night {} - {}: {} heart-rate samples, {} stage intervals, resting {:?}",
        window.start,
        window.end,
        samples.len(),
        intervals.len(),
        resting_heart_rate
    );

    Ok(NightData {
        samples,
        intervals,
        resting_heart_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use sleepchart_types::SleepStage;

    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, day, h, m, 0).unwrap()
    }

    fn night_window() -> TimeWindow {
        let end = Utc.with_ymd_and_hms(2025, 11, 1, 8, 30, 0).unwrap();
        TimeWindow::new(at(31, 23, 45), end).unwrap()
    }

    const INTRADAY: &str = r#"{
        "activities-heart": [{"dateTime": "2025-10-31", "value": "63.2"}],
        "activities-heart-intraday": {
            "dataset": [
                {"time": "23:40:00", "value": 66},
                {"time": "23:45:00", "value": 60},
                {"time": "23:59:00", "value": 58},
                {"time": "00:00:00", "value": 57},
                {"time": "00:01:00", "value": null},
                {"time": "08:30:00", "value": 70}
            ],
            "datasetInterval": 1,
            "datasetType": "minute"
        }
    }"#;

    const DAILY: &str = r#"{
        "activities-heart": [
            {"dateTime": "2025-10-31", "value": {"restingHeartRate": 54, "heartRateZones": []}},
            {"dateTime": "2025-11-01", "value": {"restingHeartRate": 56}}
        ]
    }"#;

    const SLEEP: &str = r#"{
        "sleep": [
            {
                "startTime": "2025-11-01T00:10:00.000",
                "endTime": "2025-11-01T00:30:00.000",
                "levels": {"data": [
                    {"dateTime": "2025-11-01T00:10:00.000", "level": "deep", "seconds": 1200}
                ]}
            },
            {
                "startTime": "2025-10-31T23:45:00.000",
                "endTime": "2025-11-01T00:10:00.000",
                "levels": {"data": [
                    {"dateTime": "2025-10-31T23:45:00.000", "level": "wake", "seconds": 900},
                    {"dateTime": "2025-11-01T00:00:00.000", "level": "restless", "seconds": 0},
                    {"dateTime": "2025-11-01T00:00:00.000", "level": "light", "seconds": 600}
                ]}
            },
            {
                "startTime": "2025-10-30T22:00:00.000",
                "endTime": "2025-10-31T06:00:00.000",
                "levels": {"data": [
                    {"dateTime": "2025-10-30T22:00:00.000", "level": "rem", "seconds": 600}
                ]}
            }
        ]
    }"#;

    #[test]
    fn intraday_rolls_over_midnight_and_filters_window() {
        let response = HeartRateResponse::from_slice(INTRADAY.as_bytes()).unwrap();
        let samples = response.samples(&night_window()).unwrap();

        let times: Vec<_> = samples.iter().map(|s| s.time).collect();
        assert_eq!(
            times,
            vec![
                at(31, 23, 45),
                at(31, 23, 59),
                Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 11, 1, 0, 1, 0).unwrap(),
            ]
        );
        assert_eq!(samples[3].value, None);
    }

    #[test]
    fn resting_heart_rate_from_daily_object_only() {
        let intraday = HeartRateResponse::from_slice(INTRADAY.as_bytes()).unwrap();
        let daily = HeartRateResponse::from_slice(DAILY.as_bytes()).unwrap();
        assert_eq!(intraday.resting_heart_rate(), None);
        assert_eq!(daily.resting_heart_rate(), Some(54.0));
        assert_eq!(HeartRateResponse::default().resting_heart_rate(), None);
    }

    #[test]
    fn intraday_without_day_is_missing_field() {
        let response: HeartRateResponse = serde_json::from_str(
            r#"{"activities-heart-intraday": {"dataset": [{"time": "01:00:00", "value": 50}]}}"#,
        )
        .unwrap();
        assert!(matches!(
            response.samples(&night_window()),
            Err(DecodeError::MissingField("activities-heart"))
        ));
    }

    #[test]
    fn missing_collections_decode_empty() {
        let response = HeartRateResponse::from_slice(b"{}").unwrap();
        assert!(response.samples(&night_window()).unwrap().is_empty());
        let sleep = SleepResponse::from_slice(b"{}").unwrap();
        assert!(sleep.sleep.is_empty());
    }

    #[test]
    fn sleep_levels_sorted_and_outside_logs_skipped() {
        let sleep = SleepResponse::from_slice(SLEEP.as_bytes()).unwrap();
        let intervals = stage_intervals(&sleep.sleep, &night_window()).unwrap();

        let stages: Vec<_> = intervals.iter().map(|i| i.stage.stage()).collect();
        assert_eq!(
            stages,
            vec![
                Some(SleepStage::Wake),
                Some(SleepStage::Light),
                Some(SleepStage::Deep)
            ]
        );
        assert_eq!(intervals[0].end, Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap());
        assert!(intervals.windows(2).all(|w| w[0].end <= w[1].start));
    }

    #[test]
    fn unknown_levels_are_kept_as_tags() {
        let sleep: SleepResponse = serde_json::from_str(
            r#"{"sleep": [{
                "startTime": "2025-11-01T01:00:00.000",
                "endTime": "2025-11-01T01:10:00.000",
                "levels": {"data": [{"dateTime": "2025-11-01T01:00:00.000", "level": "asleep", "seconds": 600}]}
            }]}"#,
        )
        .unwrap();
        let intervals = stage_intervals(&sleep.sleep, &night_window()).unwrap();
        assert_eq!(intervals[0].stage, StageTag::Unrecognized("asleep".to_owned()));
    }

    #[test]
    fn decode_night_prefers_daily_resting_rate() {
        let intraday = HeartRateResponse::from_slice(INTRADAY.as_bytes()).unwrap();
        let daily = HeartRateResponse::from_slice(DAILY.as_bytes()).unwrap();
        let sleep = SleepResponse::from_slice(SLEEP.as_bytes()).unwrap();

        let night = decode_night(&intraday, &sleep.sleep, Some(&daily), &night_window()).unwrap();
        assert_eq!(night.samples.len(), 4);
        assert_eq!(night.intervals.len(), 3);
        assert_eq!(night.resting_heart_rate, Some(54.0));
    }
}

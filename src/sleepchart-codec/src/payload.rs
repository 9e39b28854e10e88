use chrono::{DateTime, Utc};
use serde::Serialize;
use sleepchart_algos::{ChartData, SleepSummary};
use sleepchart_types::{MergedRecord, NightData, STAGE_STYLES, StageStyle, StageTag, Tick};

use crate::TimeWindow;

/// What the rendering surface consumes: chart points, axis ticks and the
/// stage legend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload<'a> {
    pub records: &'a [MergedRecord],
    pub ticks: &'a [Tick],
    pub legend: &'static [StageStyle],
    pub summary: SleepSummary,
}

impl<'a> ChartPayload<'a> {
    pub fn new(chart: &'a ChartData) -> Self {
        Self {
            records: &chart.records,
            ticks: &chart.ticks,
            legend: &STAGE_STYLES,
            summary: chart.summary,
        }
    }
}

/// Unprocessed sleep data for one window: raw stages and readings plus the
/// awake total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepDataResponse {
    pub metadata: ResponseMetadata,
    pub sleep_stages: Vec<SleepStageEntry>,
    pub heart_rate: Vec<HeartRatePoint>,
    pub resting_heart_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_awake_time_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepStageEntry {
    pub level: StageTag,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HeartRatePoint {
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
}

impl SleepDataResponse {
    pub fn new(window: &TimeWindow, night: &NightData) -> Self {
        let summary = SleepSummary::from_intervals(&night.intervals);

        Self {
            metadata: ResponseMetadata {
                start_time: window.start,
                end_time: window.end,
                total_awake_time_minutes: summary.total_awake_minutes,
            },
            sleep_stages: night
                .intervals
                .iter()
                .map(|interval| SleepStageEntry {
                    level: interval.stage.clone(),
                    start_time: interval.start,
                    end_time: interval.end,
                    duration_seconds: interval.duration().num_seconds(),
                })
                .collect(),
            heart_rate: night
                .samples
                .iter()
                .map(|sample| HeartRatePoint {
                    time: sample.time,
                    value: sample.value,
                })
                .collect(),
            resting_heart_rate: night.resting_heart_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use sleepchart_algos::{ChartOptions, SleepChart};
    use sleepchart_types::{Sample, SleepStage, StageInterval};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 1, h, m, 0).unwrap()
    }

    fn night() -> NightData {
        NightData {
            samples: (0..4)
                .map(|i| Sample::new(at(1, 0) + TimeDelta::minutes(5 * i), 60.0 + i as f64))
                .collect(),
            intervals: vec![
                StageInterval::new(SleepStage::Wake, at(1, 0), at(1, 10)),
                StageInterval::new("restless", at(1, 10), at(1, 12)),
                StageInterval::new(SleepStage::Rem, at(1, 12), at(1, 20)),
            ],
            resting_heart_rate: Some(52.0),
        }
    }

    #[test]
    fn chart_payload_shape() {
        let chart = SleepChart::new(ChartOptions {
            window_size: 3,
            ..Default::default()
        })
        .unwrap()
        .build(&night())
        .unwrap();
        let json = serde_json::to_value(ChartPayload::new(&chart)).unwrap();

        assert_eq!(json["records"].as_array().unwrap().len(), 4);
        assert_eq!(json["records"][0]["stage"], "wake");
        assert_eq!(json["records"][0]["heartRate"], 60.5);
        assert_eq!(json["records"][0]["restingHeartRate"], 52.0);
        assert_eq!(json["ticks"][0], "2025-11-01T01:00:00Z");
        assert_eq!(json["legend"].as_array().unwrap().len(), 4);
        assert_eq!(json["legend"][3]["label"], "WAKE");
        assert_eq!(json["summary"]["totalAwakeMinutes"], 10);
    }

    #[test]
    fn sleep_data_response_shape() {
        let window = TimeWindow::new(at(0, 30), at(2, 0)).unwrap();
        let json = serde_json::to_value(SleepDataResponse::new(&window, &night())).unwrap();

        assert_eq!(json["metadata"]["startTime"], "2025-11-01T00:30:00Z");
        assert_eq!(json["metadata"]["totalAwakeTimeMinutes"], 10);
        assert_eq!(json["sleepStages"][1]["level"], "restless");
        assert_eq!(json["sleepStages"][2]["durationSeconds"], 480);
        assert_eq!(json["heartRate"][3]["value"], 63.0);
        assert_eq!(json["restingHeartRate"], 52.0);
    }
}

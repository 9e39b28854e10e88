use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepStage {
    Deep = 0,
    Light = 1,
    Rem = 2,
    Wake = 3,
}

/// Display attributes of a sleep stage: its row on the stage axis, the
/// fill color and the axis label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StageStyle {
    pub stage: SleepStage,
    pub level: u8,
    pub color: &'static str,
    pub label: &'static str,
}

/// Indexed by `SleepStage as usize`.
pub static STAGE_STYLES: [StageStyle; 4] = [
    StageStyle {
        stage: SleepStage::Deep,
        level: 1,
        color: "#1f2937",
        label: "DEEP",
    },
    StageStyle {
        stage: SleepStage::Light,
        level: 2,
        color: "#3b82f6",
        label: "LIGHT",
    },
    StageStyle {
        stage: SleepStage::Rem,
        level: 3,
        color: "#8b5cf6",
        label: "REM",
    },
    StageStyle {
        stage: SleepStage::Wake,
        level: 4,
        color: "#facc15",
        label: "WAKE",
    },
];

impl SleepStage {
    pub const ALL: [SleepStage; 4] = [
        SleepStage::Deep,
        SleepStage::Light,
        SleepStage::Rem,
        SleepStage::Wake,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SleepStage::Deep => "deep",
            SleepStage::Light => "light",
            SleepStage::Rem => "rem",
            SleepStage::Wake => "wake",
        }
    }

    pub fn style(self) -> &'static StageStyle {
        &STAGE_STYLES[self as usize]
    }
}

impl Display for SleepStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStage(pub String);

impl Display for UnknownStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown sleep stage `{}`", self.0)
    }
}

impl std::error::Error for UnknownStage {}

impl FromStr for SleepStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SleepStage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStage(s.to_owned()))
    }
}

/// Stage tag as delivered by the data source. Sources may report levels
/// this crate does not chart (e.g. `restless`); those are kept verbatim
/// so they can be reported, and are never drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StageTag {
    Known(SleepStage),
    Unrecognized(String),
}

impl StageTag {
    pub fn stage(&self) -> Option<SleepStage> {
        match self {
            StageTag::Known(stage) => Some(*stage),
            StageTag::Unrecognized(_) => None,
        }
    }
}

impl From<String> for StageTag {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(stage) => StageTag::Known(stage),
            Err(UnknownStage(tag)) => StageTag::Unrecognized(tag),
        }
    }
}

impl From<&str> for StageTag {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<SleepStage> for StageTag {
    fn from(value: SleepStage) -> Self {
        StageTag::Known(value)
    }
}

impl From<StageTag> for String {
    fn from(value: StageTag) -> Self {
        match value {
            StageTag::Known(stage) => stage.as_str().to_owned(),
            StageTag::Unrecognized(tag) => tag,
        }
    }
}

impl Display for StageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageTag::Known(stage) => Display::fmt(stage, f),
            StageTag::Unrecognized(tag) => f.write_str(tag),
        }
    }
}

/// A contiguous stretch of one sleep stage, covering `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageInterval {
    pub stage: StageTag,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl StageInterval {
    pub fn new(stage: impl Into<StageTag>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            stage: stage.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time < self.end
    }
}

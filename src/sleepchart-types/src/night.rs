use serde::{Deserialize, Serialize};

use crate::{Sample, StageInterval};

/// Everything the data source returns for one queried window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightData {
    #[serde(default)]
    pub samples: Vec<Sample>,
    #[serde(default)]
    pub intervals: Vec<StageInterval>,
    #[serde(default)]
    pub resting_heart_rate: Option<f64>,
}

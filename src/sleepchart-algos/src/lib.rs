#[macro_use]
extern crate log;

mod error;
pub use error::ChartError;

pub(crate) mod smoother;
pub use smoother::HeartRateSmoother;

pub(crate) mod annotator;
pub use annotator::StageAnnotator;

pub(crate) mod axis;
pub use axis::{AxisPlanner, TICK_INTERVAL};

pub(crate) mod summary;
pub use summary::SleepSummary;

pub(crate) mod chart;
pub use chart::{ChartData, ChartOptions, SleepChart};

pub mod helpers;

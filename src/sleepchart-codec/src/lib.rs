#[macro_use]
extern crate log;

mod error;
pub use error::DecodeError;

mod helpers;
pub use helpers::parse_timestamp;

mod window;
pub use window::TimeWindow;

mod source;
pub use source::{
    HeartRateDay, HeartRateResponse, IntradayPoint, IntradaySeries, SleepLevelEntry, SleepLevels,
    SleepLog, SleepResponse, decode_night, stage_intervals,
};

mod payload;
pub use payload::{
    ChartPayload, HeartRatePoint, ResponseMetadata, SleepDataResponse, SleepStageEntry,
};

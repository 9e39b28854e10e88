mod sample;
pub use sample::{Sample, SmoothedSample};

mod stage;
pub use stage::{STAGE_STYLES, SleepStage, StageInterval, StageStyle, StageTag, UnknownStage};

mod record;
pub use record::{MergedRecord, Tick};

mod night;
pub use night::NightData;

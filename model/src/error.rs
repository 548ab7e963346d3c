use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTimeFormat(String),
    #[error("time offset {0} is outside of [0, 1440)")]
    OutOfRangeTime(u32),
    #[error("a route needs at least one coordinate")]
    InsufficientGeometry,
    #[error("unknown day category {0:?}")]
    UnknownDayCategory(String),
    #[error("feature {index} is invalid: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

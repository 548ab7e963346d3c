use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Minutes in one cycle of the timeline
pub const MINUTES_PER_DAY: u16 = 1440;
/// The timeline starts at 06:00, not midnight
const START_OF_DAY: u16 = 6 * 60;

/// Minutes elapsed since 06:00. Anything before 06:00 belongs to the end of the same cycle, so
/// 05:59 is 1439.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOffset(u16);

impl TimeOffset {
    pub const ZERO: TimeOffset = TimeOffset(0);

    /// Validates a raw slider value
    pub fn new(minutes: u32) -> Result<Self, Error> {
        if minutes >= MINUTES_PER_DAY as u32 {
            return Err(Error::OutOfRangeTime(minutes));
        }
        Ok(Self(minutes as u16))
    }

    /// Wraps any number of minutes into the cycle
    pub fn wrapping(minutes: u32) -> Self {
        Self((minutes % MINUTES_PER_DAY as u32) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn inner(self) -> u32 {
        self.0 as u32
    }
}

/// Parses a wall-clock `HH:MM` into an offset since 06:00.
pub fn parse_time(text: &str) -> Result<TimeOffset, Error> {
    // chrono tolerates missing padding and stray spaces, so check the shape first
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|idx| bytes[*idx].is_ascii_digit());
    if !well_formed {
        return Err(Error::InvalidTimeFormat(text.to_string()));
    }
    let time = NaiveTime::parse_from_str(text, "%H:%M")
        .map_err(|_| Error::InvalidTimeFormat(text.to_string()))?;

    let mut total = (time.hour() * 60 + time.minute()) as u16;
    if total < START_OF_DAY {
        total += MINUTES_PER_DAY;
    }
    Ok(TimeOffset(total - START_OF_DAY))
}

/// The inverse of `parse_time`, zero-padded.
pub fn format_time(offset: TimeOffset) -> String {
    let total = offset.0 as u32 + START_OF_DAY as u32;
    format!("{:02}:{:02}", (total / 60) % 24, total % 60)
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format_time(*self))
    }
}

impl FromStr for TimeOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

impl Serialize for TimeOffset {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_time(*self))
    }
}

impl<'de> Deserialize<'de> for TimeOffset {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = <String>::deserialize(d)?;
        parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

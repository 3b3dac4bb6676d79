//! Session naming types with validation.
//!
//! Session files are named `AF_YYYYMMDDTHHMMSS.xml`. Every type here is a
//! structured view of one or more of those fixed-width fields.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by every session file name.
pub const SESSION_FILE_PREFIX: &str = "AF_";

/// Extension shared by every session file name.
pub const SESSION_FILE_EXTENSION: &str = ".xml";

/// Length of a well-formed session file name.
pub const SESSION_FILE_NAME_LEN: usize = 22;

/// Pre-compiled pattern for session file names.
static SESSION_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^AF_([0-9]{4})([0-9]{2})([0-9]{2})T([0-9]{2})([0-9]{2})([0-9]{2})\.xml$").unwrap()
});

/// Errors produced when parsing session naming fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionNameError {
    /// The file name does not have the `AF_YYYYMMDDTHHMMSS.xml` shape.
    #[error("not a session file name: {0}")]
    Shape(String),

    /// The digits are in place but do not form a real date or time.
    #[error("invalid date or time in session file name: {0}")]
    Calendar(String),

    /// A month label was not `MM/YYYY`.
    #[error("invalid month: {0} (expected MM/YYYY)")]
    Month(String),

    /// A time label did not contain exactly six digits.
    #[error("invalid time of day: {0} (expected HH:MM:SS)")]
    TimeOfDay(String),
}

/// Identifies one recorded session by its start date and time.
///
/// Ordering is chronological, which is also the lexicographic order of the
/// underlying file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionIdentifier {
    date: NaiveDate,
    time: NaiveTime,
}

impl SessionIdentifier {
    /// Parses a bare file name such as `AF_20240305T101500.xml`.
    pub fn from_file_name(name: &str) -> Result<Self, SessionNameError> {
        let caps = SESSION_FILE_RE
            .captures(name)
            .ok_or_else(|| SessionNameError::Shape(name.to_string()))?;

        // The pattern only admits ASCII digits, so these parses cannot fail.
        let field = |i: usize| caps[i].parse::<u32>().unwrap_or_default();
        let year = caps[1].parse::<i32>().unwrap_or_default();

        let date = NaiveDate::from_ymd_opt(year, field(2), field(3));
        let time = NaiveTime::from_hms_opt(field(4), field(5), field(6));
        match (date, time) {
            (Some(date), Some(time)) => Ok(Self { date, time }),
            _ => Err(SessionNameError::Calendar(name.to_string())),
        }
    }

    pub fn month(&self) -> MonthBucket {
        MonthBucket {
            year: self.date.year(),
            month: self.date.month(),
        }
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub const fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay(self.time)
    }

    /// The canonical file name this identifier was parsed from.
    pub fn file_name(&self) -> String {
        SessionSelection {
            month: self.month(),
            day: self.day(),
            time: self.time_of_day(),
        }
        .file_name()
    }

    /// Heading shown for an opened session, e.g. `5/03/2024 10:15:00`.
    pub fn title(&self) -> String {
        format!("{}/{} {}", self.day(), self.month(), self.time_of_day())
    }
}

impl fmt::Display for SessionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

impl FromStr for SessionIdentifier {
    type Err = SessionNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_file_name(s)
    }
}

impl Serialize for SessionIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.file_name())
    }
}

/// A calendar month used to group sessions.
///
/// Fields are ordered year-first so the derived ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthBucket {
    year: i32,
    month: u32,
}

impl MonthBucket {
    /// Creates a month bucket, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, SessionNameError> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(SessionNameError::Month(format!("{month:02}/{year:04}")));
        }
        Ok(Self { year, month })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for MonthBucket {
    type Err = SessionNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SessionNameError::Month(s.to_string());
        let (month, year) = s.trim().split_once('/').ok_or_else(err)?;
        if month.len() > 2 || year.len() != 4 {
            return Err(err());
        }
        let month: u32 = month.parse().map_err(|_| err())?;
        let year: i32 = year.parse().map_err(|_| err())?;
        Self::new(year, month).map_err(|_| err())
    }
}

impl Serialize for MonthBucket {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Start time of a session within its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, SessionNameError> {
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or_else(|| SessionNameError::TimeOfDay(format!("{hour}:{minute}:{second}")))
    }

    /// The six-digit `HHMMSS` form used inside file names.
    pub fn compact(&self) -> String {
        format!(
            "{:02}{:02}{:02}",
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }
}

impl FromStr for TimeOfDay {
    type Err = SessionNameError;

    /// Accepts any separator style as long as exactly six digits remain,
    /// so both `10:15:00` and `101500` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SessionNameError::TimeOfDay(s.to_string());
        let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
        if digits.len() != 6 {
            return Err(err());
        }
        let pair = |i: usize| digits[i] * 10 + digits[i + 1];
        Self::new(pair(0), pair(2), pair(4)).map_err(|_| err())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// The three independently chosen parts of a session pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSelection {
    #[serde(with = "month_label")]
    pub month: MonthBucket,
    pub day: u32,
    #[serde(with = "time_label")]
    pub time: TimeOfDay,
}

impl SessionSelection {
    /// Rebuilds the canonical file name from the fixed-width fields.
    ///
    /// The day is always zero-padded to two digits.
    pub fn file_name(&self) -> String {
        format!(
            "{SESSION_FILE_PREFIX}{:04}{:02}{:02}T{}{SESSION_FILE_EXTENSION}",
            self.month.year,
            self.month.month,
            self.day,
            self.time.compact()
        )
    }
}

mod month_label {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::MonthBucket;

    pub fn serialize<S: Serializer>(month: &MonthBucket, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(month)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<MonthBucket, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

mod time_label {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TimeOfDay;

    pub fn serialize<S: Serializer>(time: &TimeOfDay, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(time)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<TimeOfDay, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

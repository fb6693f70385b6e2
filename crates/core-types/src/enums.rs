use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical weekday buckets, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Canonical month buckets, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The calendar unit a purchase distribution is bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalUnit {
    DayOfWeek,
    MonthOfYear,
}

impl TemporalUnit {
    /// The full, ordered label set for this unit. Every distribution reports all of them.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            TemporalUnit::DayOfWeek => &WEEKDAY_LABELS,
            TemporalUnit::MonthOfYear => &MONTH_LABELS,
        }
    }

    /// Index of the bucket `timestamp` falls into, in `labels()` order.
    pub fn bucket_index(&self, timestamp: &NaiveDateTime) -> usize {
        match self {
            TemporalUnit::DayOfWeek => timestamp.weekday().num_days_from_monday() as usize,
            TemporalUnit::MonthOfYear => timestamp.month0() as usize,
        }
    }
}

impl fmt::Display for TemporalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalUnit::DayOfWeek => write!(f, "day of week"),
            TemporalUnit::MonthOfYear => write!(f, "month of year"),
        }
    }
}

/// Which page the presentation layer is showing.
///
/// This is plain navigation state owned by the caller and passed into rendering,
/// so it can be serialized into a URL or a CLI argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Dashboard,
    RawData,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Dashboard => write!(f, "dashboard"),
            Page::RawData => write!(f, "raw_data"),
        }
    }
}

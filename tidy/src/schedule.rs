//! Scheduling and classification fields attached to a task.
//!
//! Date and time come from picker widgets upstream, so both are optional and
//! are parsed leniently when read back from storage.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_WITH_SECONDS: &str = "%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from parsing task fields out of user or stored text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldParseError {
    /// Not an `HH:MM` time of day
    #[error("invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// Neither a `YYYY-MM-DD` date nor an RFC 3339 timestamp
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Not one of `school`, `work`, `leisure`
    #[error("unknown category '{0}': expected school, work or leisure")]
    UnknownCategory(String),
}

/// Task category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Default category
    #[default]
    School,
    /// Work
    Work,
    /// Leisure
    Leisure,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Self; 3] = [Self::School, Self::Work, Self::Leisure];

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::School => "School",
            Self::Work => "Work",
            Self::Leisure => "Leisure",
        }
    }

    /// Wire name, as stored and accepted on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Work => "work",
            Self::Leisure => "leisure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FieldParseError::UnknownCategory(s.to_string()))
    }
}

/// Time of day a task is scheduled for, stored as `HH:MM`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduledTime(NaiveTime);

impl ScheduledTime {
    /// Build from hour and minute, `None` if out of range
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// The underlying time
    #[must_use]
    pub const fn as_naive_time(self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ScheduledTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for ScheduledTime {
    type Err = FieldParseError;

    /// Accepts `HH:MM`, and `HH:MM:SS` with the seconds dropped
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(trimmed, TIME_FORMAT_WITH_SECONDS))
            .ok()
            .and_then(|time| Self::from_hm(time.hour(), time.minute()))
            .ok_or_else(|| FieldParseError::InvalidTime(s.to_string()))
    }
}

impl Serialize for ScheduledTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScheduledTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a scheduled date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp as written by a browser
/// date picker, which is reduced to its local calendar date.
///
/// # Errors
///
/// Returns [`FieldParseError::InvalidDate`] if neither form matches.
pub fn parse_date(s: &str) -> Result<NaiveDate, FieldParseError> {
    let trimmed = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.with_timezone(&Local).date_naive())
        .map_err(|_| FieldParseError::InvalidDate(s.to_string()))
}

/// Serde adapter for `Option<NaiveDate>` stored as `"YYYY-MM-DD"` or `null`
pub(crate) mod optional_date {
    use super::{parse_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)] // serde `with` passes `&Option<T>`
    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_date(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Deserialize a category, mapping `null` and unrecognised names to the default
pub(crate) fn category_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Category, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw {
        None => Category::default(),
        Some(name) => name.parse().unwrap_or_else(|_| {
            tracing::warn!(category = %name, "Unknown stored category, using default");
            Category::default()
        }),
    })
}

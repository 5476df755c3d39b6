use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const SECONDS_PER_DAY: i64 = 86_400;
const UNIX_EPOCH_JULIAN_DAY: i64 = 2_440_588;

/// Map a UNIX timestamp (seconds) to the UTC calendar day containing it.
pub const fn day_from_unix_seconds(seconds: i64) -> TradingDay {
    TradingDay(seconds.div_euclid(SECONDS_PER_DAY))
}

/// Calendar day counted in whole days since 1970-01-01 (UTC).
///
/// Kept as a plain day number so ordering and equality never depend on the
/// calendar library accepting the value; conversion to a [`Date`] only
/// happens for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDay(i64);

impl TradingDay {
    pub const fn from_days_since_epoch(days: i64) -> Self {
        Self(days)
    }

    pub fn from_date(date: Date) -> Self {
        Self(i64::from(date.to_julian_day()) - UNIX_EPOCH_JULIAN_DAY)
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        parse_date(input).map(Self::from_date)
    }

    pub const fn days_since_epoch(self) -> i64 {
        self.0
    }

    pub fn to_date(self) -> Option<Date> {
        let julian = i32::try_from(self.0.checked_add(UNIX_EPOCH_JULIAN_DAY)?).ok()?;
        Date::from_julian_day(julian).ok()
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        ValidationError::InvalidDate {
            value: input.to_owned(),
        }
    })
}

impl Display for TradingDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to_date() {
            Some(date) => write!(f, "{date}"),
            None => write!(f, "day {}", self.0),
        }
    }
}

impl Serialize for TradingDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradingDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

use std::fmt::{Display, Formatter};

use time::macros::time;
use time::{Date, Duration, OffsetDateTime};

use crate::ValidationError;

/// Requested history window, either explicit or relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    kind: RangeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeKind {
    Between { start: i64, end: i64 },
    LastDays(u32),
}

impl DateRange {
    /// Explicit window in UNIX seconds; `start` must not be after `end`.
    pub fn between_unix(start: i64, end: i64) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange { start, end });
        }
        Ok(Self {
            kind: RangeKind::Between { start, end },
        })
    }

    /// Whole calendar days, from the start of `start` through the end of `end` (UTC).
    pub fn from_dates(start: Date, end: Date) -> Result<Self, ValidationError> {
        let start_ts = start.midnight().assume_utc().unix_timestamp();
        let end_ts = end.with_time(time!(23:59:59)).assume_utc().unix_timestamp();
        Self::between_unix(start_ts, end_ts)
    }

    pub fn last_days(days: u32) -> Result<Self, ValidationError> {
        if days == 0 {
            return Err(ValidationError::ZeroDays);
        }
        Ok(Self {
            kind: RangeKind::LastDays(days),
        })
    }

    /// Resolve against `now`, turning a day count into `[now - days, now]`.
    ///
    /// A start before the earliest representable date is clamped to it.
    pub fn resolve(self, now: OffsetDateTime) -> ResolvedRange {
        match self.kind {
            RangeKind::Between { start, end } => ResolvedRange { start, end },
            RangeKind::LastDays(days) => {
                let end = now.unix_timestamp();
                let start = now
                    .checked_sub(Duration::days(i64::from(days)))
                    .unwrap_or_else(|| Date::MIN.midnight().assume_utc())
                    .unix_timestamp();
                ResolvedRange { start, end }
            }
        }
    }

    pub fn resolve_now(self) -> ResolvedRange {
        self.resolve(OffsetDateTime::now_utc())
    }
}

impl From<Lookback> for DateRange {
    fn from(value: Lookback) -> Self {
        Self {
            kind: RangeKind::LastDays(value.days()),
        }
    }
}

/// Concrete window in UNIX seconds, as sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: i64,
    pub end: i64,
}

impl ResolvedRange {
    pub const fn period1(self) -> i64 {
        self.start
    }

    pub const fn period2(self) -> i64 {
        self.end
    }
}

/// Day-count choices offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lookback {
    #[default]
    Month,
    Quarter,
    HalfYear,
    Year,
}

impl Lookback {
    pub const ALL: [Self; 4] = [Self::Month, Self::Quarter, Self::HalfYear, Self::Year];

    pub const fn days(self) -> u32 {
        match self {
            Self::Month => 30,
            Self::Quarter => 90,
            Self::HalfYear => 180,
            Self::Year => 365,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Month => "Last 30 Days",
            Self::Quarter => "Last 90 Days",
            Self::HalfYear => "Last 180 Days",
            Self::Year => "Last 365 Days",
        }
    }
}

impl TryFrom<u32> for Lookback {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|lookback| lookback.days() == value)
            .ok_or(ValidationError::InvalidLookback { value })
    }
}

impl Display for Lookback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

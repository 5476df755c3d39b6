//! # Domain Models
//!
//! Canonical types shared by the fetch, normalize and presentation stages.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, upper-cased ticker |
//! | [`DateRange`] | Explicit or day-count history window |
//! | [`Lookback`] | Enumerated day-count choices (30/90/180/365) |
//! | [`TradingDay`] | UTC calendar day derived from a UNIX timestamp |
//! | [`DailyQuote`] | One day of OHLCV values, gaps kept as `None` |
//! | [`QuoteSeries`] | Normalized history for one symbol |

mod quote;
mod range;
mod symbol;
mod trading_day;

pub use quote::{DailyQuote, QuoteSeries};
pub use range::{DateRange, Lookback, ResolvedRange};
pub use symbol::Symbol;
pub use trading_day::{day_from_unix_seconds, parse_date, TradingDay};

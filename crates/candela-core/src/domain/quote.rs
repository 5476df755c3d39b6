use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDay};

/// One trading day of OHLCV data.
///
/// Any field may be absent when the provider reported a gap for that day;
/// such records are kept rather than dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyQuote {
    pub date: TradingDay,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

impl DailyQuote {
    /// `(open, high, low, close)` when all four prices are present.
    pub fn ohlc(&self) -> Option<(f64, f64, f64, f64)> {
        Some((self.open?, self.high?, self.low?, self.close?))
    }

    pub fn is_complete(&self) -> bool {
        self.ohlc().is_some() && self.volume.is_some()
    }
}

/// Normalized daily history for one instrument, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSeries {
    pub symbol: Symbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_name: Option<String>,
    pub quotes: Vec<DailyQuote>,
}

impl QuoteSeries {
    pub fn new(symbol: Symbol, quotes: Vec<DailyQuote>) -> Self {
        Self {
            symbol,
            currency: None,
            exchange_name: None,
            quotes,
        }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Number of records carrying at least one missing field.
    pub fn gap_count(&self) -> usize {
        self.quotes.iter().filter(|quote| !quote.is_complete()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_from_unix_seconds;

    fn quote(close: Option<f64>) -> DailyQuote {
        DailyQuote {
            date: day_from_unix_seconds(0),
            open: Some(1.0),
            high: Some(2.0),
            low: Some(0.5),
            close,
            volume: Some(10),
        }
    }

    #[test]
    fn ohlc_requires_every_price() {
        assert_eq!(quote(Some(1.5)).ohlc(), Some((1.0, 2.0, 0.5, 1.5)));
        assert_eq!(quote(None).ohlc(), None);
    }

    #[test]
    fn gap_count_tracks_incomplete_records() {
        let series = QuoteSeries::new(
            Symbol::parse("AAPL").expect("valid"),
            vec![quote(Some(1.5)), quote(None)],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.gap_count(), 1);
    }
}

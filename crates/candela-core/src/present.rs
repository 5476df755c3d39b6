//! Presentation views derived from a [`QuoteSeries`].
//!
//! | View | Order | Consumer |
//! |------|-------|----------|
//! | [`TabularView`] | date descending (latest first) | price tables |
//! | [`ChartPoint`] series | date ascending | candlestick charts |
//!
//! Both derivations are total and stable: equal dates keep input order, and
//! an empty series yields empty views.

use serde::{Deserialize, Serialize};

use crate::format::{format_row, FormattedRow};
use crate::{DailyQuote, QuoteSeries, Symbol, TradingDay};

/// Quotes ordered most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularView {
    pub rows: Vec<DailyQuote>,
}

impl TabularView {
    pub fn formatted_rows(&self) -> Vec<FormattedRow> {
        self.rows.iter().map(format_row).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One candle keyed by date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: TradingDay,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

impl ChartPoint {
    pub fn ohlc(&self) -> Option<(f64, f64, f64, f64)> {
        Some((self.open?, self.high?, self.low?, self.close?))
    }
}

impl From<&DailyQuote> for ChartPoint {
    fn from(quote: &DailyQuote) -> Self {
        Self {
            date: quote.date,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
        }
    }
}

/// Everything a view sink needs for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceView {
    pub symbol: Symbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub table: TabularView,
    pub chart: Vec<ChartPoint>,
}

pub fn tabular_view(series: &QuoteSeries) -> TabularView {
    let mut rows = series.quotes.clone();
    // sort_by is stable, so equal dates keep input order.
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    TabularView { rows }
}

pub fn chart_series(series: &QuoteSeries) -> Vec<ChartPoint> {
    let mut points = series.quotes.iter().map(ChartPoint::from).collect::<Vec<_>>();
    points.sort_by_key(|point| point.date);
    points
}

pub fn build(series: &QuoteSeries) -> PriceView {
    PriceView {
        symbol: series.symbol.clone(),
        currency: series.currency.clone(),
        table: tabular_view(series),
        chart: chart_series(series),
    }
}
